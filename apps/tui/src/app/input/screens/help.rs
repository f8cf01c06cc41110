use crate::app::state::{App, Overlay};
use crossterm::event::KeyCode;

pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if app.overlay == Overlay::Search {
        return false;
    }

    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.toggle_overlay(Overlay::Help);
        return true;
    }

    if app.overlay == Overlay::Help {
        if matches!(key, KeyCode::Esc | KeyCode::Enter) {
            app.overlay = Overlay::None;
        }
        return true;
    }

    false
}

pub fn handle_about_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('a') => app.overlay = Overlay::None,
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
}
