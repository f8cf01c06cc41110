use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::{App, Overlay};
use crossterm::event::KeyCode;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.search_push(c),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Up => {
            app.search.index = wrap_decrement(app.search.index, app.search.results.len());
        }
        KeyCode::Down | KeyCode::Tab => {
            app.search.index = wrap_increment(app.search.index, app.search.results.len());
        }
        KeyCode::Enter => app.confirm_search(),
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}
