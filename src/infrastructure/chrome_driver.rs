//! [`PageDriver`] over a Chromium page
//!
//! Every primitive is a small script run through the [`JsExecutor`]. Waits
//! poll a boolean probe until it holds or the timeout elapses; evaluation
//! errors while polling are treated as "not yet" since the page is often
//! mid-postback when they happen.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::time::{sleep, timeout as deadline};
use tracing::debug;

use crate::error::{DriverError, DriverResult};
use crate::infrastructure::js_executor::JsExecutor;
use crate::infrastructure::page_driver::{Element, PageDriver};
use crate::models::Locator;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct ChromeDriver {
    executor: JsExecutor,
    poll_interval: Duration,
}

/// JS string literal for `value`
fn js_string(value: &str) -> String {
    JsonValue::String(value.to_string()).to_string()
}

/// JS expression evaluating to the first match or `null`
fn first_node(locator: &Locator) -> String {
    format!(
        "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
        js_string(locator.as_str())
    )
}

fn present_probe(locator: &Locator) -> String {
    format!("({}) !== null", first_node(locator))
}

fn clickable_probe(locator: &Locator) -> String {
    format!(
        r#"(() => {{
    const el = {node};
    if (!el || el.disabled) return false;
    if (el.tagName === 'OPTION') {{
        const select = el.closest('select');
        return !!select && !select.disabled;
    }}
    const style = window.getComputedStyle(el);
    return el.getClientRects().length > 0 && style.visibility !== 'hidden';
}})()"#,
        node = first_node(locator)
    )
}

fn text_probe(locator: &Locator, substring: &str) -> String {
    format!(
        r#"(() => {{
    const el = {node};
    if (!el) return false;
    return (el.innerText || el.textContent || '').includes({needle});
}})()"#,
        node = first_node(locator),
        needle = js_string(substring)
    )
}

fn click_script(locator: &Locator) -> String {
    format!(
        r#"(() => {{
    const el = {node};
    if (!el) return false;
    if (el.tagName === 'OPTION') {{
        const select = el.closest('select');
        el.selected = true;
        if (select) select.dispatchEvent(new Event('change', {{ bubbles: true }}));
        return true;
    }}
    el.click();
    return true;
}})()"#,
        node = first_node(locator)
    )
}

fn find_all_script(locator: &Locator) -> String {
    format!(
        r#"(() => {{
    const snapshot = document.evaluate({xpath}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
    const found = [];
    for (let i = 0; i < snapshot.snapshotLength; i++) {{
        const el = snapshot.snapshotItem(i);
        const attributes = {{}};
        for (const attr of el.attributes || []) attributes[attr.name] = attr.value;
        if (el.href) attributes.href = el.href;
        found.push({{ attributes, text: (el.innerText || el.textContent || '').trim() }});
    }}
    return found;
}})()"#,
        xpath = js_string(locator.as_str())
    )
}

impl ChromeDriver {
    pub fn new(executor: JsExecutor) -> Self {
        Self {
            executor,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn executor(&self) -> &JsExecutor {
        &self.executor
    }

    async fn poll(
        &self,
        condition: &'static str,
        locator: &Locator,
        probe: String,
        timeout: Duration,
    ) -> DriverResult<()> {
        let until_true = async {
            loop {
                match self.executor.eval_as::<bool>(probe.as_str()).await {
                    Ok(true) => return,
                    Ok(false) => {}
                    Err(e) => debug!("probe for {} failed, retrying: {}", condition, e),
                }
                sleep(self.poll_interval).await;
            }
        };

        deadline(timeout, until_true)
            .await
            .map_err(|_| DriverError::Timeout {
                condition,
                locator: locator.to_string(),
                timeout,
            })
    }
}

#[async_trait]
impl PageDriver for ChromeDriver {
    async fn navigate(&self, url: &str) -> DriverResult<()> {
        self.executor.goto(url).await
    }

    async fn wait_until_clickable(&self, locator: &Locator, timeout: Duration) -> DriverResult<()> {
        self.poll("clickable", locator, clickable_probe(locator), timeout)
            .await
    }

    async fn wait_until_present(&self, locator: &Locator, timeout: Duration) -> DriverResult<()> {
        self.poll("presence", locator, present_probe(locator), timeout)
            .await
    }

    async fn wait_until_text_present(
        &self,
        locator: &Locator,
        substring: &str,
        timeout: Duration,
    ) -> DriverResult<()> {
        self.poll("text", locator, text_probe(locator, substring), timeout)
            .await
    }

    async fn click(&self, locator: &Locator) -> DriverResult<()> {
        let clicked: bool = self.executor.eval_as(click_script(locator)).await?;
        if !clicked {
            return Err(DriverError::NoSuchElement {
                locator: locator.to_string(),
            });
        }
        debug!("clicked {}", locator);
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> DriverResult<Vec<Element>> {
        let elements: Vec<Element> = self.executor.eval_as(find_all_script(locator)).await?;
        debug!("{} elements match {}", elements.len(), locator);
        Ok(elements)
    }

    async fn run_script(&self, code: &str) -> DriverResult<JsonValue> {
        debug!("running script: {}", code);
        self.executor.eval(code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_is_embedded_as_js_string() {
        let locator = Locator::xpath(r#"//input[@value="Pesquisar"]"#);
        let script = first_node(&locator);
        assert!(script.contains(r#""//input[@value=\"Pesquisar\"]""#));
    }

    #[test]
    fn test_text_probe_escapes_needle() {
        let script = text_probe(&Locator::xpath("//span"), "it's \"here\"");
        assert!(script.contains(r#""it's \"here\"""#));
    }

    #[test]
    fn test_option_click_selects_and_fires_change() {
        let script = click_script(&Locator::xpath("//option"));
        assert!(script.contains("el.selected = true"));
        assert!(script.contains("new Event('change'"));
    }
}
