use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::spawn_handler;
use crate::error::SessionError;

/// Attaches to a browser started with `--remote-debugging-port=<port>`
///
/// # Arguments
/// - `port`: the browser's remote debugging port on localhost
///
/// # Returns
/// The browser, the task draining its event stream and a new blank page.
/// A new page is opened so the user's tabs are left alone.
pub async fn connect_to_browser(port: u16) -> Result<(Browser, JoinHandle<()>, Page), SessionError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("connecting to browser at {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("could not connect to browser: {}", e);
        SessionError::Connect { port, source: e }
    })?;
    let handler = spawn_handler(handler);
    debug!("browser connected");

    // let the browser settle before opening targets
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("could not open a page: {}", e);
            handler.abort();
            return Err(SessionError::PageCreation(e));
        }
    };
    info!("✓ attached to browser on port {}", port);

    Ok((browser, handler, page))
}
