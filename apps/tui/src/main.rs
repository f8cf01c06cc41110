mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use bixi_dashboard::config::{init_app_config, init_logging, LogDestination};
use bixi_dashboard::source::{spawn_poller, HttpStationFetcher};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use tokio::sync::mpsc;
use tracing::info;

/// Resolved fetches waiting for the UI loop. Polls are minutes apart, so this
/// only fills up if the UI stalls.
const FEED_CHANNEL_CAPACITY: usize = 16;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    if let LogDestination::Discarded(reason) = init_logging(&config.log_file, config.debug)? {
        // Still on the plain terminal here; the UI has not taken over yet.
        eprintln!("Logging disabled: {reason}");
    }
    info!(api_base = %config.api_base, "starting bixi dashboard");

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&config, args.json).await;
    }

    let mut app = App::new(&config);
    app.initialize_preferences(&config.database_url).await;

    let fetcher = HttpStationFetcher::new(&config.api_base)?;
    let (tx, mut rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
    app.attach_poller(spawn_poller(fetcher, config.poll_interval, tx));

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    info!("bixi dashboard stopped");
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
