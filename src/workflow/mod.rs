pub mod crawl_ctx;
pub mod pagination;

pub use crawl_ctx::CrawlCtx;
pub use pagination::{page_count_from_counter, PaginationEngine, RESULTS_PER_PAGE};
