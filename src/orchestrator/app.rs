//! Application lifecycle
//!
//! Owns the browser session for the whole run:
//!
//! 1. **initialize**: open the browser session (fatal on failure)
//! 2. **run**: load the cache, open the listing, crawl, write the ids, save
//!    the cache
//! 3. **shutdown**: always, whatever step 2 returned
//!
//! [`harvest`] is step 2 on its own and works with any [`PageDriver`].

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::browser::{BrowserSession, DriverKind};
use crate::config::Config;
use crate::infrastructure::PageDriver;
use crate::models::EntityKind;
use crate::orchestrator::crawler::{CrawlOptions, CrawlSummary, Crawler};
use crate::services::{CacheStore, ResultWriter};
use crate::utils::logging::{log_startup, print_final_stats};

/// What to harvest in this run
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub kind: EntityKind,
    /// Every legislature instead of the most recent one
    pub full: bool,
    /// Read and update the cache
    pub caching: bool,
}

pub struct App {
    config: Config,
    options: RunOptions,
    session: BrowserSession,
}

impl App {
    pub async fn initialize(config: Config, options: RunOptions, driver: DriverKind) -> Result<Self> {
        log_startup(options.kind, options.full, options.caching);

        let session = BrowserSession::open(driver, &config)
            .await
            .with_context(|| format!("could not start the {:?} driver", driver))?;

        Ok(Self {
            config,
            options,
            session,
        })
    }

    /// Runs the harvest, then shuts the browser down
    pub async fn run(self) -> Result<CrawlSummary> {
        let App {
            config,
            options,
            session,
        } = self;

        let outcome = harvest(session.driver(), &config, &options).await;
        session.close().await;
        outcome
    }
}

/// Crawls and writes results using an already open driver
///
/// Failed legislatures do not make this fail; the output and the cache still
/// get written with whatever was collected.
pub async fn harvest<D: PageDriver + ?Sized>(
    driver: &D,
    config: &Config,
    options: &RunOptions,
) -> Result<CrawlSummary> {
    let kind = options.kind;

    let mut cache_store = CacheStore::new(&config.cache_dir, options.caching);
    let cache = cache_store.load(kind).await;

    let url = kind.listing_url(&config.base_url);
    info!("🌐 opening {}", url);
    driver
        .navigate(&url)
        .await
        .with_context(|| format!("could not open listing {}", url))?;

    let mut crawler = Crawler::new(
        driver,
        kind,
        cache,
        CrawlOptions {
            full: options.full,
            caching: cache_store.is_enabled(),
            timeout: config.wait_timeout(),
        },
    );

    let legislatures = crawler
        .list_legislatures()
        .await
        .context("could not read the legislature selector")?;
    let summary = crawler.run(&legislatures).await;
    let (cache, result) = crawler.into_parts();

    let output_path = ResultWriter::with_dir(&config.output_dir)
        .write(kind, &result)
        .await
        .context("could not write results")?;

    if let Err(e) = cache_store.save(kind, &cache).await {
        error!("❌ could not save cache: {}", e);
    }

    print_final_stats(&summary, &output_path);
    Ok(summary)
}
