use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Runtime configuration
///
/// Resolution order: defaults, then the optional TOML file, then environment
/// variables. Command-line flags are applied on top by the caller.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site root the listing paths are joined to
    pub base_url: String,
    /// Directory holding `<kind>_cache.json`
    pub cache_dir: PathBuf,
    /// Directory receiving `<kind>_ids.txt`
    pub output_dir: PathBuf,
    /// Upper bound for every wait on the page
    pub wait_timeout_secs: u64,
    /// Delay between two polls of a wait condition
    pub poll_interval_ms: u64,
    /// Debug port used by the `connect` driver
    pub browser_debug_port: u16,
    /// Browser executable, when it is not on the default search path
    pub chrome_executable: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://www.parlamento.pt".to_string(),
            cache_dir: PathBuf::from("cache"),
            output_dir: PathBuf::from("."),
            wait_timeout_secs: 20,
            poll_interval_ms: 250,
            browser_debug_port: 9222,
            chrome_executable: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Reads `path` (if any) and applies environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn with_env_overrides(self) -> Self {
        fn var(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.is_empty())
        }

        Self {
            base_url: var("PARLIAMENT_BASE_URL").unwrap_or(self.base_url),
            cache_dir: var("CACHE_DIR").map(PathBuf::from).unwrap_or(self.cache_dir),
            output_dir: var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            wait_timeout_secs: var("WAIT_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.wait_timeout_secs),
            poll_interval_ms: var("POLL_INTERVAL_MS").and_then(|v| v.parse().ok()).unwrap_or(self.poll_interval_ms),
            browser_debug_port: var("BROWSER_DEBUG_PORT").and_then(|v| v.parse().ok()).unwrap_or(self.browser_debug_port),
            chrome_executable: var("CHROME_EXECUTABLE").map(PathBuf::from).or(self.chrome_executable),
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
