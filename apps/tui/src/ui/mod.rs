// UI module for the dashboard
// Handles all rendering; state lives in `app`

pub mod screens;
pub mod widgets;

use crate::app::state::Overlay;
use crate::app::App;
use ratatui::Frame;

pub use screens::dashboard::map_area;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);

    if app.feed.snapshot().is_none() {
        screens::loading::render_loading(app, f);
    }

    match app.overlay {
        Overlay::None => {}
        Overlay::Settings => screens::settings::render_settings(app, f),
        Overlay::About => screens::about::render_about(app, f),
        Overlay::Help => screens::help::render_help(app, f),
        Overlay::Search => screens::search::render_search(app, f),
    }
}
