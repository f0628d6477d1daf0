//! Crawl context
//!
//! "Which kind, which legislature": carried through the pagination flow so
//! every log line names what it belongs to.

use std::fmt::Display;

use crate::models::{EntityKind, Legislature};

#[derive(Debug, Clone)]
pub struct CrawlCtx {
    pub kind: EntityKind,
    pub legislature: Legislature,
    /// Whether extracted ids are merged into the cache
    pub caching: bool,
}

impl CrawlCtx {
    pub fn new(kind: EntityKind, legislature: Legislature, caching: bool) -> Self {
        Self {
            kind,
            legislature,
            caching,
        }
    }
}

impl Display for CrawlCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} legislature {}]", self.kind, self.legislature)
    }
}
