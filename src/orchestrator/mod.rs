//! Orchestration layer
//!
//! ```text
//! app (one run: browser session, cache, output)
//!     ↓
//! crawler (Vec<Legislature>, failure isolation)
//!     ↓
//! workflow::PaginationEngine (one legislature, page by page)
//!     ↓
//! services (extraction / cache store / result writer)
//!     ↓
//! infrastructure (PageDriver, JsExecutor)
//! ```
//!
//! Only this layer owns the browser session, the cache record and the run
//! result.

pub mod app;
pub mod crawler;

pub use app::{harvest, App, RunOptions};
pub use crawler::{should_process, CrawlOptions, CrawlSummary, Crawler};
