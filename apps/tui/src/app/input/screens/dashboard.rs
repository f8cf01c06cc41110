use crate::app::state::{App, Overlay, PanDirection};
use crossterm::event::KeyCode;

pub async fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc | KeyCode::Char('c') => {
            app.close_panel();
        }
        KeyCode::Left | KeyCode::Char('h') => app.pan(PanDirection::Left),
        KeyCode::Right | KeyCode::Char('l') => app.pan(PanDirection::Right),
        KeyCode::Up | KeyCode::Char('k') => app.pan(PanDirection::Up),
        KeyCode::Down | KeyCode::Char('j') => app.pan(PanDirection::Down),
        KeyCode::Char('+' | '=') => app.zoom_in(),
        KeyCode::Char('-' | '_') => app.zoom_out(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('s') => app.toggle_overlay(Overlay::Settings),
        KeyCode::Char('b') => {
            let next = app.settings.basemap.next();
            app.set_basemap(next).await;
        }
        KeyCode::Char('a') => app.toggle_overlay(Overlay::About),
        KeyCode::Char('L') => app.toggle_language(),
        KeyCode::Char('/') => app.open_search(),
        _ => {}
    }
}
