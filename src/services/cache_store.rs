//! Cache store
//!
//! Persists one [`CacheRecord`] per entity kind as
//! `<cache_dir>/<kind>_cache.json`. Loading never fails: a missing, unreadable
//! or corrupt file yields an empty record, and a cache directory that cannot
//! be created switches caching off for the rest of the run.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{CrawlError, CrawlResult};
use crate::models::{CacheRecord, EntityKind};

pub struct CacheStore {
    dir: PathBuf,
    enabled: bool,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.dir.join(kind.cache_file_name())
    }

    pub async fn load(&mut self, kind: EntityKind) -> CacheRecord {
        if !self.enabled {
            debug!("caching disabled, starting from an empty cache");
            return CacheRecord::default();
        }

        if let Err(e) = fs::create_dir_all(&self.dir).await {
            warn!("⚠️ could not create cache directory {}: {}", self.dir.display(), e);
            warn!("⚠️ results will not be cached in this run");
            self.enabled = false;
            return CacheRecord::default();
        }

        let path = self.path_for(kind);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("no cache file at {}, starting from an empty cache", path.display());
                return CacheRecord::default();
            }
            Err(e) => {
                warn!("⚠️ could not open cache file {}: {}, using an empty cache", path.display(), e);
                return CacheRecord::default();
            }
        };

        match serde_json::from_str::<CacheRecord>(&content) {
            Ok(record) => {
                info!(
                    "✓ loaded cache: {} legislatures, {} ids",
                    record.processed_legislatures.len(),
                    record.seen.len()
                );
                record
            }
            Err(e) => {
                warn!("⚠️ cache file {} is corrupt: {}, using an empty cache", path.display(), e);
                CacheRecord::default()
            }
        }
    }

    /// Writes `record`; no-op when caching is disabled
    ///
    /// The file is replaced atomically through a temporary sibling.
    pub async fn save(&self, kind: EntityKind, record: &CacheRecord) -> CrawlResult<()> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.path_for(kind);
        let tmp_path = path.with_extension("json.tmp");
        let io_err = |source| CrawlError::Io {
            path: path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| io_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;
        fs::write(&tmp_path, json).await.map_err(io_err)?;
        fs::rename(&tmp_path, &path).await.map_err(io_err)?;

        info!("💾 cache saved to {}", path.display());
        Ok(())
    }
}
