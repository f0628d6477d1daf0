pub mod cache_record;
pub mod entity_kind;
pub mod identifier;
pub mod locators;
pub mod run_result;

pub use cache_record::CacheRecord;
pub use entity_kind::{EntityKind, KindProfile};
pub use identifier::{EntityId, Legislature};
pub use locators::Locator;
pub use run_result::RunResult;
