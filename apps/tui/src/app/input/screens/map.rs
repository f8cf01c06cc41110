use crate::app::state::{App, Overlay};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Pointer gestures on the map. Ignored while a modal is open.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.overlay != Overlay::None {
        return;
    }

    let point = app.cell_to_point(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(point) = point {
                app.pointer_down(point);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(point) = point {
                app.pointer_moved(point);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => match point {
            Some(point) => app.pointer_up(point),
            None => app.pointer_cancel(),
        },
        MouseEventKind::ScrollUp if point.is_some() => app.zoom_in(),
        MouseEventKind::ScrollDown if point.is_some() => app.zoom_out(),
        _ => {}
    }
}
