use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::browser::spawn_handler;
use crate::error::SessionError;

/// Launches a browser and opens a blank page
///
/// # Arguments
/// - `headless`: run without a window (new headless mode) or with one
/// - `executable`: browser binary to use instead of the one found on the
///   default search path
///
/// # Returns
/// The browser, the task draining its event stream and the blank page
///
/// # Errors
/// - [`SessionError::Config`] for a configuration the builder rejects
/// - [`SessionError::Launch`] when the process does not start
/// - [`SessionError::PageCreation`] when no page can be opened; the freshly
///   launched browser is shut down before this is returned
pub async fn launch_browser(
    headless: bool,
    executable: Option<&Path>,
) -> Result<(Browser, JoinHandle<()>, Page), SessionError> {
    info!("🚀 launching browser (headless: {})", headless);

    let mut builder = BrowserConfig::builder();
    builder = if headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(path) = executable {
        debug!("browser executable: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder
        .args(vec![
            "--disable-gpu",           // required by headless mode on some platforms
            "--no-sandbox",            // containers often lack the sandbox privileges
            "--disable-dev-shm-usage", // small /dev/shm in containers
        ])
        .build()
        .map_err(|e| {
            error!("invalid browser configuration: {}", e);
            SessionError::Config(e)
        })?;

    // start the browser
    let (mut browser, handler) = Browser::launch(config).await.map_err(|e| {
        error!("could not launch browser: {}", e);
        SessionError::Launch(e)
    })?;
    // drain browser events in the background
    let handler = spawn_handler(handler);
    debug!("browser launched");

    // let the browser settle before opening targets
    sleep(tokio::time::Duration::from_millis(300)).await;

    match browser.new_page("about:blank").await {
        Ok(page) => {
            info!("✅ browser ready");
            Ok((browser, handler, page))
        }
        Err(e) => {
            error!("could not open a page: {}", e);
            if let Err(close_err) = browser.close().await {
                warn!("closing browser after failed start: {}", close_err);
            }
            let _ = browser.wait().await;
            handler.abort();
            Err(SessionError::PageCreation(e))
        }
    }
}
