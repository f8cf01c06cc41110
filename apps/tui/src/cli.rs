use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "bixi-dashboard", version, about = "Real-time BIXI station map for the terminal")]
pub struct CliArgs {
    /// Fetch once, print system stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the station API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the preference database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Interface language (en or fr)
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Override the log file path
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    /// Flags win over `.env` because dotenv never overwrites variables that
    /// are already set.
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("BIXI_API_URL", url);
        }
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(lang) = &self.lang {
            std::env::set_var("BIXI_LANG", lang);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("BIXI_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
