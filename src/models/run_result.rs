use std::collections::{HashMap, HashSet};

use crate::models::identifier::{EntityId, Legislature};

/// Ids discovered during this run, per legislature
///
/// Ids already present in the cache when a page was processed are never
/// recorded here.
#[derive(Debug, Default)]
pub struct RunResult {
    by_legislature: HashMap<Legislature, HashSet<EntityId>>,
}

impl RunResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, legislature: &Legislature, ids: impl IntoIterator<Item = EntityId>) {
        self.by_legislature
            .entry(legislature.clone())
            .or_default()
            .extend(ids);
    }

    pub fn for_legislature(&self, legislature: &Legislature) -> Option<&HashSet<EntityId>> {
        self.by_legislature.get(legislature)
    }

    /// All ids across legislatures, deduplicated and sorted
    pub fn sorted_ids(&self) -> Vec<EntityId> {
        let all: HashSet<&EntityId> = self.by_legislature.values().flatten().collect();
        let mut ids: Vec<EntityId> = all.into_iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn total(&self) -> usize {
        self.by_legislature
            .values()
            .flatten()
            .collect::<HashSet<_>>()
            .len()
    }
}
