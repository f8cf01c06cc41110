use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, Overlay};
use bixi_dashboard::domain::Basemap;
use crossterm::event::KeyCode;

pub async fn handle_settings_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_index = wrap_decrement(app.settings_index, Basemap::ALL.len());
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.settings_index = wrap_increment(app.settings_index, Basemap::ALL.len());
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(basemap) = Basemap::ALL.get(app.settings_index).copied() {
                app.set_basemap(basemap).await;
            }
        }
        KeyCode::Esc | KeyCode::Char('s') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}
