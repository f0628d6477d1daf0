//! Pagination engine
//!
//! Drives one legislature through the listing:
//!
//! 1. select the legislature (and clear the session filter where there is one)
//! 2. press search and wait for both the page-1 indicator and the results
//!    counter, which refresh at different times
//! 3. derive the page count from the counter
//! 4. walk pages 1..=n through pager postbacks, extracting ids from each
//!
//! Errors are returned as-is; the orchestrator decides what a failed
//! legislature means for the run.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{CrawlError, CrawlResult};
use crate::infrastructure::PageDriver;
use crate::models::{locators, CacheRecord, KindProfile, RunResult};
use crate::services::extract_ids;
use crate::workflow::crawl_ctx::CrawlCtx;

/// Rows rendered per result page
pub const RESULTS_PER_PAGE: u64 = 20;

/// Present in the results counter once a search has completed
pub const RESULTS_MARKER: &str = "Resultado";

fn first_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"))
}

/// Number of result pages for a counter such as "123 Resultados encontrados"
pub fn page_count_from_counter(text: &str) -> CrawlResult<u32> {
    let malformed = || CrawlError::MalformedCounter {
        text: text.to_string(),
    };
    let count: u64 = first_number()
        .find(text)
        .ok_or_else(malformed)?
        .as_str()
        .parse()
        .map_err(|_| malformed())?;
    u32::try_from(count.div_ceil(RESULTS_PER_PAGE)).map_err(|_| malformed())
}

pub struct PaginationEngine<'a, D: ?Sized> {
    driver: &'a D,
    profile: &'static KindProfile,
    timeout: Duration,
}

impl<'a, D: PageDriver + ?Sized> PaginationEngine<'a, D> {
    pub fn new(driver: &'a D, profile: &'static KindProfile, timeout: Duration) -> Self {
        Self {
            driver,
            profile,
            timeout,
        }
    }

    pub async fn select_legislature(&self, ctx: &CrawlCtx) -> CrawlResult<()> {
        let option = self.profile.legislature_option(ctx.legislature.as_str());
        self.driver.wait_until_clickable(&option, self.timeout).await?;
        self.driver.click(&option).await?;
        debug!("{} selected", ctx);
        Ok(())
    }

    /// Picks "all sessions"; does nothing for kinds without a session filter
    pub async fn clear_session(&self, ctx: &CrawlCtx) -> CrawlResult<()> {
        let Some(option) = self.profile.empty_session_option() else {
            return Ok(());
        };
        self.driver.wait_until_clickable(&option, self.timeout).await?;
        self.driver.click(&option).await?;
        debug!("{} session filter cleared", ctx);
        Ok(())
    }

    pub async fn trigger_search(&self, ctx: &CrawlCtx) -> CrawlResult<()> {
        let search = locators::search_button();
        self.driver.wait_until_clickable(&search, self.timeout).await?;
        self.driver.click(&search).await?;

        self.driver
            .wait_until_present(&locators::current_page(1), self.timeout)
            .await?;
        self.driver
            .wait_until_text_present(&locators::results_counter(), RESULTS_MARKER, self.timeout)
            .await?;
        debug!("{} search finished", ctx);
        Ok(())
    }

    pub async fn page_count(&self) -> CrawlResult<u32> {
        let text = self.driver.find_text(&locators::results_counter()).await?;
        page_count_from_counter(&text)
    }

    /// Extracts one page and merges its ids
    ///
    /// Ids not yet in the cache go to `result`. With caching on, every
    /// extracted id is then merged into the cache, so re-running a page is
    /// harmless. Returns how many ids were new.
    pub async fn process_page(
        &self,
        page_number: u32,
        ctx: &CrawlCtx,
        cache: &mut CacheRecord,
        result: &mut RunResult,
    ) -> CrawlResult<usize> {
        info!("{} 📄 page {}", ctx, page_number);

        // page 1 is already showing after the search
        if page_number != 1 {
            self.driver
                .run_script(&self.profile.page_postback(page_number))
                .await?;
        }
        self.driver
            .wait_until_present(&locators::current_page(page_number), self.timeout)
            .await?;

        let extracted = extract_ids(self.driver, self.profile).await?;
        let new_ids: Vec<_> = extracted
            .iter()
            .filter(|id| !cache.seen.contains(*id))
            .cloned()
            .collect();
        let new_count = new_ids.len();
        result.record(&ctx.legislature, new_ids);

        if ctx.caching {
            cache.seen.extend(extracted);
        }

        debug!("{} page {}: {} new ids", ctx, page_number, new_count);
        Ok(new_count)
    }

    /// Full pipeline for one legislature; returns the number of pages walked
    pub async fn process_legislature(
        &self,
        ctx: &CrawlCtx,
        cache: &mut CacheRecord,
        result: &mut RunResult,
    ) -> CrawlResult<u32> {
        self.select_legislature(ctx).await?;
        self.clear_session(ctx).await?;
        self.trigger_search(ctx).await?;

        let pages = self.page_count().await?;
        info!("{} {} result pages", ctx, pages);

        for page_number in 1..=pages {
            self.process_page(page_number, ctx, cache, result).await?;
        }
        Ok(pages)
    }
}
