use crate::domain::Language;
use crate::source::{DEFAULT_POLL_INTERVAL, DEFAULT_STALE_AFTER};
use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Used when `BIXI_API_URL` is unset or empty: the API server the dashboard
/// is developed against.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub database_url: String,
    pub language: Language,
    pub log_file: PathBuf,
    pub debug: bool,
    pub poll_interval: Duration,
    pub stale_after: Duration,
}

/// Initializes the application configuration from `.env` and the environment
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let api_base = api_base_from(env::var("BIXI_API_URL").ok());
    let database_url = database_url()?;
    let language = env::var("BIXI_LANG")
        .ok()
        .and_then(|value| Language::parse(&value))
        .unwrap_or_default();
    let log_file = env::var("BIXI_LOG_FILE")
        .map_or_else(|_| PathBuf::from("bixi-dashboard.log"), PathBuf::from);
    let debug = env::var("DEBUG").is_ok_and(|value| value == "1" || value == "true");

    Ok(AppConfig {
        api_base,
        database_url,
        language,
        log_file,
        debug,
        poll_interval: DEFAULT_POLL_INTERVAL,
        stale_after: DEFAULT_STALE_AFTER,
    })
}

fn api_base_from(value: Option<String>) -> String {
    value
        .map(|base| base.trim().trim_end_matches('/').to_string())
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

fn database_url() -> color_eyre::eyre::Result<String> {
    let base_dir: PathBuf = env::current_dir()?;
    let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "bixi-dashboard.db".to_string());
    let database_path = base_dir.join(&db_name);

    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    // SQLx wants sqlite:/// for absolute paths and sqlite:// for relative ones.
    let clean_path = path_str.trim_start_matches('/');
    if database_path.is_absolute() {
        Ok(format!("sqlite:///{clean_path}"))
    } else {
        Ok(format!("sqlite://{clean_path}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_base_falls_back_to_local_server() {
        assert_eq!(api_base_from(None), DEFAULT_API_BASE);
        assert_eq!(api_base_from(Some("  ".to_string())), DEFAULT_API_BASE);
        assert_eq!(
            api_base_from(Some("https://bixi.example.com/".to_string())),
            "https://bixi.example.com"
        );
    }
}
