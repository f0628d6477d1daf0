//! # Parliament ids
//!
//! Incrementally harvests entity ids (members, initiatives, attendance
//! records) from the paginated listings of the parliament website, one
//! legislature at a time, remembering what earlier runs already saw.
//!
//! ## Layers
//!
//! ### ① Infrastructure
//! - `infrastructure/` - holds the scarce resource (the page) and only
//!   exposes capabilities
//! - `JsExecutor` - the only page owner, provides `eval()`
//! - `PageDriver` - navigate / wait / click / find / script, implemented by
//!   `ChromeDriver` on top of `JsExecutor`
//!
//! ### ② Services
//! - `services/` - single-purpose capabilities
//! - `extraction` - ids from the current result page
//! - `CacheStore` - per-kind cache file
//! - `ResultWriter` - `<kind>_ids.txt`
//!
//! ### ③ Workflow
//! - `workflow/` - the flow for one legislature
//! - `CrawlCtx` - kind + legislature, for logging
//! - `PaginationEngine` - select → search → page count → pages
//!
//! ### ④ Orchestration
//! - `orchestrator/crawler` - iterates legislatures, isolates failures
//! - `orchestrator/app` - browser session, cache, output, shutdown

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

pub use config::Config;
pub use error::{CrawlError, DriverError, SessionError};
pub use infrastructure::{ChromeDriver, Element, JsExecutor, PageDriver};
pub use models::{CacheRecord, EntityId, EntityKind, Legislature, Locator, RunResult};
pub use orchestrator::{harvest, App, CrawlSummary, Crawler, RunOptions};
