use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::identifier::{EntityId, Legislature};

/// Crawl progress persisted between runs
///
/// Both collections only grow. A legislature is recorded only after every one
/// of its pages was processed without error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(rename = "legislatures", default)]
    pub processed_legislatures: Vec<Legislature>,
    #[serde(rename = "ids", default, with = "sorted_ids")]
    pub seen: HashSet<EntityId>,
}

impl CacheRecord {
    pub fn is_processed(&self, legislature: &Legislature) -> bool {
        self.processed_legislatures.contains(legislature)
    }

    /// Records a completed legislature; returns false if it was already there
    pub fn mark_processed(&mut self, legislature: &Legislature) -> bool {
        if self.is_processed(legislature) {
            return false;
        }
        self.processed_legislatures.push(legislature.clone());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.processed_legislatures.is_empty() && self.seen.is_empty()
    }
}

/// Writes the id set as a sorted list so cache files diff cleanly
mod sorted_ids {
    use std::collections::HashSet;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::models::identifier::EntityId;

    pub fn serialize<S: Serializer>(ids: &HashSet<EntityId>, serializer: S) -> Result<S::Ok, S::Error> {
        let mut sorted: Vec<&EntityId> = ids.iter().collect();
        sorted.sort();
        sorted.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HashSet<EntityId>, D::Error> {
        let ids = Vec::<EntityId>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
