//! Error types, one enum per layer.
//!
//! - [`DriverError`]: anything the page driver reports (timeouts, missing
//!   elements, script failures)
//! - [`CrawlError`]: failures while processing one legislature. These are
//!   caught at the legislature boundary and never abort the run.
//! - [`SessionError`]: browser construction failures, fatal before crawling
//! - [`ConfigError`]: unreadable or invalid config file

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Page driver errors
#[derive(Debug, Error)]
pub enum DriverError {
    /// A wait did not see its condition before the deadline
    #[error("timed out after {timeout:?} waiting for {condition}: {locator}")]
    Timeout {
        condition: &'static str,
        locator: String,
        timeout: Duration,
    },

    #[error("no element matches {locator}")]
    NoSuchElement { locator: String },

    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    #[error("script execution failed: {0}")]
    Script(#[from] chromiumoxide::error::CdpError),

    /// The script ran but returned something we could not decode
    #[error("unexpected script result: {0}")]
    Decode(#[from] serde_json::Error),

    /// Raised by test doubles and by drivers that wrap other transports
    #[error("{0}")]
    Other(String),
}

/// Failure while crawling a single legislature
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The results counter did not contain a number
    #[error("results counter has no count: {text:?}")]
    MalformedCounter { text: String },

    #[error("identifier link has no `{attribute}` attribute")]
    MissingAttribute { attribute: &'static str },

    #[error("identifier link has no `=` delimiter: {href}")]
    MalformedLink { href: String },

    #[error("writing {} failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Browser session construction errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("driver `{name}` is not supported (expected headless, headed or connect)")]
    UnsupportedDriver { name: String },

    #[error("invalid browser configuration: {0}")]
    Config(String),

    #[error("could not launch browser: {0}")]
    Launch(#[source] chromiumoxide::error::CdpError),

    #[error("could not connect to browser on port {port}: {source}")]
    Connect {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    #[error("could not open a page: {0}")]
    PageCreation(#[source] chromiumoxide::error::CdpError),
}

/// Config file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type DriverResult<T> = Result<T, DriverError>;

pub type CrawlResult<T> = Result<T, CrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_converts_into_crawl_error() {
        let err: CrawlError = DriverError::NoSuchElement {
            locator: "//span".to_string(),
        }
        .into();

        assert!(matches!(err, CrawlError::Driver(_)));
        assert_eq!(err.to_string(), "no element matches //span");
    }

    #[test]
    fn test_timeout_message_names_condition_and_locator() {
        let err = DriverError::Timeout {
            condition: "clickable",
            locator: "//input".to_string(),
            timeout: Duration::from_secs(20),
        };

        let msg = err.to_string();
        assert!(msg.contains("clickable"));
        assert!(msg.contains("//input"));
        assert!(msg.contains("20s"));
    }
}
