pub mod chrome_driver;
pub mod js_executor;
pub mod page_driver;

pub use chrome_driver::ChromeDriver;
pub use js_executor::JsExecutor;
pub use page_driver::{Element, PageDriver, DEFAULT_TIMEOUT};
