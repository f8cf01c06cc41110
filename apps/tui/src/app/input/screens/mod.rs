use crate::app::state::{App, Overlay};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

mod dashboard;
mod help;
pub mod map;
mod search;
mod settings;

pub async fn dispatch_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    if help::handle_help_toggle(app, key.code) {
        return;
    }

    match app.overlay {
        Overlay::Settings => settings::handle_settings_input(app, key.code).await,
        Overlay::Search => search::handle_search_input(app, key.code),
        Overlay::About => help::handle_about_input(app, key.code),
        Overlay::Help | Overlay::None => dashboard::handle_dashboard_input(app, key.code).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bixi_dashboard::config::AppConfig;
    use bixi_dashboard::domain::{Basemap, Language};
    use std::path::PathBuf;
    use std::time::Duration;

    fn app() -> App {
        App::new(&AppConfig {
            api_base: "http://localhost:8000".to_string(),
            database_url: "sqlite::memory:".to_string(),
            language: Language::En,
            log_file: PathBuf::from("test.log"),
            debug: false,
            poll_interval: Duration::from_secs(180),
            stale_after: Duration::from_secs(60),
        })
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn settings_modal_applies_basemap() {
        let mut app = app();
        dispatch_input(&mut app, press(KeyCode::Char('s'))).await;
        assert_eq!(app.overlay, Overlay::Settings);

        dispatch_input(&mut app, press(KeyCode::Down)).await;
        dispatch_input(&mut app, press(KeyCode::Enter)).await;
        assert_eq!(app.settings.basemap, Basemap::OpenStreetMap);

        dispatch_input(&mut app, press(KeyCode::Esc)).await;
        assert_eq!(app.overlay, Overlay::None);
    }

    #[tokio::test]
    async fn help_swallows_keys_until_closed() {
        let mut app = app();
        dispatch_input(&mut app, press(KeyCode::Char('?'))).await;
        assert_eq!(app.overlay, Overlay::Help);

        dispatch_input(&mut app, press(KeyCode::Char('q'))).await;
        assert!(app.running);

        dispatch_input(&mut app, press(KeyCode::Esc)).await;
        dispatch_input(&mut app, press(KeyCode::Char('q'))).await;
        assert!(!app.running);
    }

    #[tokio::test]
    async fn search_captures_typed_characters() {
        let mut app = app();
        dispatch_input(&mut app, press(KeyCode::Char('/'))).await;
        dispatch_input(&mut app, press(KeyCode::Char('q'))).await;
        dispatch_input(&mut app, press(KeyCode::Char('?'))).await;

        assert!(app.running);
        assert_eq!(app.overlay, Overlay::Search);
        assert_eq!(app.search.query, "q?");
    }

    #[tokio::test]
    async fn ctrl_c_always_quits() {
        let mut app = app();
        app.overlay = Overlay::Settings;
        dispatch_input(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).await;
        assert!(!app.running);
    }
}
