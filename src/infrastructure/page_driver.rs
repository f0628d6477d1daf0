//! Page driver capability
//!
//! Everything the crawl needs from a browser, expressed as a trait so the
//! pagination and crawl layers can run against [`ChromeDriver`] in production
//! and against an in-memory listing in tests.
//!
//! [`ChromeDriver`]: crate::infrastructure::ChromeDriver

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{DriverError, DriverResult};
use crate::models::Locator;

/// Upper bound for every wait on the remote listing
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Snapshot of a located element
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Element {
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    text: String,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            attributes: HashMap::new(),
            text: text.into(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// Waits until the first match is visible and enabled
    async fn wait_until_clickable(&self, locator: &Locator, timeout: Duration) -> DriverResult<()>;

    async fn wait_until_present(&self, locator: &Locator, timeout: Duration) -> DriverResult<()>;

    /// Waits until the text of the first match contains `substring`
    async fn wait_until_text_present(
        &self,
        locator: &Locator,
        substring: &str,
        timeout: Duration,
    ) -> DriverResult<()>;

    /// Activates the first match. Options are selected in their `<select>`.
    async fn click(&self, locator: &Locator) -> DriverResult<()>;

    /// All matches in document order
    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<Element>>;

    async fn run_script(&self, code: &str) -> DriverResult<JsonValue>;

    /// Text of the first match
    async fn find_text(&self, locator: &Locator) -> DriverResult<String> {
        self.find_all(locator)
            .await?
            .into_iter()
            .next()
            .map(|element| element.text)
            .ok_or_else(|| DriverError::NoSuchElement {
                locator: locator.to_string(),
            })
    }
}
