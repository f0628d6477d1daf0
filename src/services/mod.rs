pub mod cache_store;
pub mod extraction;
pub mod result_writer;

pub use cache_store::CacheStore;
pub use extraction::extract_ids;
pub use result_writer::ResultWriter;
