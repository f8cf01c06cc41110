use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::app::{handle_input, handle_mouse, App};
use crate::ui;
use bixi_dashboard::config::AppConfig;
use bixi_dashboard::domain::AvailabilityStatus;
use bixi_dashboard::source::{FeedMessage, HttpStationFetcher, StationFetcher};
use bixi_dashboard::station::StationCollection;

/// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Run the dashboard without a UI: fetch once and print the system summary.
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let fetcher = HttpStationFetcher::new(&config.api_base)?;
    info!(url = fetcher.url(), "headless fetch");
    let collection = fetcher.fetch().await?;
    let stats = build_headless_stats(&collection);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(&stats);
    }

    Ok(())
}

fn render_headless_stats(stats: &HeadlessStats) {
    println!("\nBIXI Station Stats");
    println!("==================");
    if let Some(updated) = &stats.last_updated {
        println!("Last updated: {updated}");
    }
    println!("Stations: {}", stats.station_count);
    println!("Bikes available: {}", stats.total_bikes);
    println!("E-bikes available: {}", stats.total_ebikes);
    println!("Docks available: {}", stats.total_docks);

    println!("\nStations by availability:");
    for (status, count) in &stats.by_status {
        println!("- {}: {count}", status.label());
    }

    if stats.capacity_violations > 0 {
        println!(
            "\n{} station(s) report more bikes and docks than capacity",
            stats.capacity_violations
        );
    }
}

fn build_headless_stats(collection: &StationCollection) -> HeadlessStats {
    let stats = &collection.metadata.stats;
    HeadlessStats {
        last_updated: collection.metadata.last_updated.clone(),
        station_count: collection.len(),
        total_bikes: stats.total_bikes,
        total_ebikes: stats.total_ebikes,
        total_docks: stats.total_docks,
        by_status: collection.count_by_status(),
        capacity_violations: collection.capacity_violations(),
    }
}

#[derive(Debug, serde::Serialize)]
struct HeadlessStats {
    last_updated: Option<String>,
    station_count: usize,
    total_bikes: u64,
    total_ebikes: u64,
    total_docks: u64,
    by_status: Vec<(AvailabilityStatus, usize)>,
    capacity_violations: usize,
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    feed: &mut mpsc::Receiver<FeedMessage>,
) -> Result<()> {
    loop {
        // Fold resolved fetches in before drawing so a frame never shows a
        // snapshot whose selection hasn't been reconciled.
        while let Ok(message) = feed.try_recv() {
            app.handle_feed_message(message, Instant::now());
        }

        // Update animations
        app.update();

        let size = terminal.size()?;
        app.resize_map(ui::map_area(Rect::new(0, 0, size.width, size.height)));

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    handle_input(app, key).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse),
                Ok(Event::Resize(width, height)) => {
                    debug!(width, height, "terminal resized");
                }
                Ok(Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {}
            }
        }
    }
    Ok(())
}
