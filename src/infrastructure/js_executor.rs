//! JS executor
//!
//! Sole owner of the browser page. Exposes navigation and "evaluate this
//! script" and nothing else; it knows nothing about listings or legislatures.

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{DriverError, DriverResult};

/// JS executor
///
/// Responsibilities:
/// - holds the only `Page`
/// - exposes `goto()` and `eval()`
/// - knows nothing about kinds, legislatures or ids
/// - does no waiting or retrying
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    /// Creates an executor owning `page`
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Page reference, for callers that need to close it
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigates the page and waits for the load to finish
    ///
    /// # Arguments
    /// - `url`: absolute address to open
    ///
    /// # Errors
    /// [`DriverError::Navigation`] carrying the url when the load fails
    pub async fn goto(&self, url: &str) -> DriverResult<()> {
        debug!("navigating to {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|source| DriverError::Navigation {
                url: url.to_string(),
                source,
            })?;
        Ok(())
    }

    /// Evaluates `js_code` and returns its JSON value
    ///
    /// # Arguments
    /// - `js_code`: JavaScript expression or IIFE to run in the page
    ///
    /// # Returns
    /// The JSON value of the result; scripts that evaluate to `undefined`
    /// yield `Null`
    pub async fn eval(&self, js_code: impl Into<String>) -> DriverResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        Ok(result.value().cloned().unwrap_or(JsonValue::Null))
    }

    /// Evaluates `js_code` and deserializes the result into `T`
    ///
    /// # Arguments
    /// - `js_code`: JavaScript expression or IIFE to run in the page
    ///
    /// # Returns
    /// The deserialized value, or [`DriverError::Decode`] when the result
    /// does not have the shape of `T`
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> DriverResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }
}
