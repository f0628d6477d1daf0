//! Browser session lifecycle
//!
//! A [`BrowserSession`] is acquired once per run and must be released with
//! [`BrowserSession::close`] on every exit path. Construction failures that
//! happen after the browser process exists close it before returning.

mod connection;
mod headless;

use std::str::FromStr;

use chromiumoxide::Browser;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::SessionError;
use crate::infrastructure::{ChromeDriver, JsExecutor};

pub use connection::connect_to_browser;
pub use headless::launch_browser;

/// How the browser is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DriverKind {
    /// Launch a headless browser
    Headless,
    /// Launch a browser with a visible window
    Headed,
    /// Attach to a browser already listening on the debug port
    Connect,
}

impl FromStr for DriverKind {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "headless" => Ok(DriverKind::Headless),
            "headed" => Ok(DriverKind::Headed),
            "connect" => Ok(DriverKind::Connect),
            _ => Err(SessionError::UnsupportedDriver {
                name: s.to_string(),
            }),
        }
    }
}

pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    driver: ChromeDriver,
    /// Whether this process launched the browser and must shut it down
    owns_browser: bool,
}

impl BrowserSession {
    /// Opens a session as configured
    pub async fn open(kind: DriverKind, config: &Config) -> Result<Self, SessionError> {
        let (browser, handler, page, owns_browser) = match kind {
            DriverKind::Headless | DriverKind::Headed => {
                let (browser, handler, page) = launch_browser(
                    kind == DriverKind::Headless,
                    config.chrome_executable.as_deref(),
                )
                .await?;
                (browser, handler, page, true)
            }
            DriverKind::Connect => {
                let (browser, handler, page) =
                    connect_to_browser(config.browser_debug_port).await?;
                (browser, handler, page, false)
            }
        };

        let driver = ChromeDriver::new(JsExecutor::new(page)).with_poll_interval(config.poll_interval());

        Ok(Self {
            browser,
            handler,
            driver,
            owns_browser,
        })
    }

    pub fn driver(&self) -> &ChromeDriver {
        &self.driver
    }

    /// Shuts the session down. Never fails; problems are logged.
    pub async fn close(mut self) {
        if self.owns_browser {
            if let Err(e) = self.browser.close().await {
                warn!("closing browser failed: {}", e);
            }
            if let Err(e) = self.browser.wait().await {
                warn!("waiting for browser exit failed: {}", e);
            }
        } else if let Err(e) = self.driver.executor().page().clone().close().await {
            warn!("closing page failed: {}", e);
        }
        self.handler.abort();
        info!("browser session closed");
    }
}

/// Drains the browser event stream until it ends
fn spawn_handler(mut handler: chromiumoxide::Handler) -> JoinHandle<()> {
    use futures::StreamExt;

    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}
