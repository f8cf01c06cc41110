mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::{KeyEvent, MouseEvent};

pub async fn handle_input(app: &mut App, key: KeyEvent) {
    screens::dispatch_input(app, key).await;
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    screens::map::handle_mouse(app, mouse);
}
