//! Crawl orchestrator
//!
//! Walks the legislatures in order, one at a time. A legislature that fails
//! anywhere in its pipeline is logged and left out of the cache's processed
//! list, so the next full run retries it; the crawl moves on to the next one.
//! The crawler owns the [`CacheRecord`] and [`RunResult`] for the whole run
//! and hands them back through [`Crawler::into_parts`].

use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::CrawlResult;
use crate::infrastructure::{PageDriver, DEFAULT_TIMEOUT};
use crate::models::{CacheRecord, EntityKind, Legislature, RunResult};
use crate::workflow::{CrawlCtx, PaginationEngine};

/// Whether a legislature has to be crawled in this run
///
/// Only full runs skip legislatures the cache already lists; a default run
/// always re-crawls the legislature it was pointed at.
pub fn should_process(legislature: &Legislature, cache: &CacheRecord, full: bool) -> bool {
    !(full && cache.is_processed(legislature))
}

#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Crawl every legislature instead of the most recent one
    pub full: bool,
    /// Merge results into the cache
    pub caching: bool,
    pub timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            full: false,
            caching: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Outcome of [`Crawler::run`]
#[derive(Debug, Default)]
pub struct CrawlSummary {
    pub processed: Vec<Legislature>,
    pub skipped: Vec<Legislature>,
    pub failed: Vec<(Legislature, String)>,
    pub pages: u32,
    pub new_ids: usize,
}

impl CrawlSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Crawler<'a, D: ?Sized> {
    driver: &'a D,
    kind: EntityKind,
    options: CrawlOptions,
    cache: CacheRecord,
    result: RunResult,
}

impl<'a, D: PageDriver + ?Sized> Crawler<'a, D> {
    pub fn new(driver: &'a D, kind: EntityKind, cache: CacheRecord, options: CrawlOptions) -> Self {
        Self {
            driver,
            kind,
            options,
            cache,
            result: RunResult::new(),
        }
    }

    /// Legislatures offered by the selector
    ///
    /// Full runs get every non-empty option in document order, otherwise only
    /// the selected one (the most recent legislature). A selector that never
    /// renders any option yields an empty list, so the run still writes its
    /// output and cache.
    pub async fn list_legislatures(&self) -> CrawlResult<Vec<Legislature>> {
        let profile = self.kind.profile();
        if let Err(e) = self
            .driver
            .wait_until_present(&profile.legislature_options(), self.options.timeout)
            .await
        {
            warn!("⚠️ legislature selector did not load: {}", e);
            return Ok(Vec::new());
        }

        let locator = if self.options.full {
            profile.legislature_options()
        } else {
            profile.selected_legislature()
        };
        let legislatures: Vec<Legislature> = self
            .driver
            .find_all(&locator)
            .await?
            .iter()
            .filter_map(|option| option.attribute("value"))
            .map(Legislature::new)
            .collect();

        if legislatures.is_empty() {
            warn!("⚠️ the legislature selector offers nothing to crawl");
        } else {
            info!(
                "✓ {} legislatures to crawl: {}",
                legislatures.len(),
                legislatures
                    .iter()
                    .map(Legislature::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(legislatures)
    }

    pub async fn run(&mut self, legislatures: &[Legislature]) -> CrawlSummary {
        let engine = PaginationEngine::new(self.driver, self.kind.profile(), self.options.timeout);
        let mut summary = CrawlSummary::default();

        for legislature in legislatures {
            if self.options.caching && !should_process(legislature, &self.cache, self.options.full) {
                info!("⏭️ skipping cached legislature {}", legislature);
                summary.skipped.push(legislature.clone());
                continue;
            }

            let ctx = CrawlCtx::new(self.kind, legislature.clone(), self.options.caching);
            info!("{} processing...", ctx);

            match engine
                .process_legislature(&ctx, &mut self.cache, &mut self.result)
                .await
            {
                Ok(pages) => {
                    if self.options.caching {
                        self.cache.mark_processed(legislature);
                    }
                    summary.pages += pages;
                    summary.processed.push(legislature.clone());
                    info!("{} ✓ done ({} pages)", ctx, pages);
                }
                Err(e) => {
                    error!("{} ❌ failed: {}", ctx, e);
                    summary.failed.push((legislature.clone(), e.to_string()));
                }
            }
        }

        summary.new_ids = self.result.total();
        summary
    }

    pub fn cache(&self) -> &CacheRecord {
        &self.cache
    }

    pub fn result(&self) -> &RunResult {
        &self.result
    }

    pub fn into_parts(self) -> (CacheRecord, RunResult) {
        (self.cache, self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with(legislatures: &[&str]) -> CacheRecord {
        let mut cache = CacheRecord::default();
        for leg in legislatures {
            cache.mark_processed(&Legislature::new(*leg));
        }
        cache
    }

    #[test]
    fn test_full_run_skips_cached_legislature() {
        let cache = cache_with(&["XII"]);
        assert!(!should_process(&"XII".into(), &cache, true));
        assert!(should_process(&"XIII".into(), &cache, true));
    }

    #[test]
    fn test_default_run_always_processes() {
        let cache = cache_with(&["XIII"]);
        assert!(should_process(&"XIII".into(), &cache, false));
    }

    #[test]
    fn test_empty_cache_processes_everything() {
        let cache = CacheRecord::default();
        assert!(should_process(&"I".into(), &cache, true));
        assert!(should_process(&"I".into(), &cache, false));
    }
}
