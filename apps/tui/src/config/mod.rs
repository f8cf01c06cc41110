mod env;
mod logging;

pub use env::{init_app_config, AppConfig, DEFAULT_API_BASE};
pub use logging::{init_logging, LogDestination};
