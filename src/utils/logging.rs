//! Run banners
//!
//! Start and end-of-run summaries, in the same framed layout everywhere.

use std::path::Path;

use tracing::{info, warn};

use crate::models::EntityKind;
use crate::orchestrator::CrawlSummary;

pub fn log_startup(kind: EntityKind, full: bool, caching: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 harvesting {} ids", kind);
    info!(
        "📊 mode: {} | cache: {}",
        if full { "all legislatures" } else { "most recent legislature" },
        if caching { "on" } else { "off" }
    );
    info!("started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(60));
}

pub fn print_final_stats(summary: &CrawlSummary, output_path: &Path) {
    info!("{}", "=".repeat(60));
    info!("📊 crawl finished");
    info!("finished: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(60));
    info!("✅ processed: {}", summary.processed.len());
    info!("⏭️ skipped (cached): {}", summary.skipped.len());
    info!("❌ failed: {}", summary.failed.len());
    for (legislature, reason) in &summary.failed {
        warn!("   legislature {}: {}", legislature, reason);
    }
    info!("📄 pages: {} | new ids: {}", summary.pages, summary.new_ids);
    info!("{}", "=".repeat(60));
    info!("results saved to {}", output_path.display());
}
