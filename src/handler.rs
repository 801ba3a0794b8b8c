use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// Rows moved per wheel notch.
const SCROLL_STEP: usize = 3;

/// Handle a key event. Keys only raise the quit signal.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        _ => {}
    }
}

/// Handle a mouse event: left clicks are hit-tested, the wheel scrolls.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.scroll_down(SCROLL_STEP),
        MouseEventKind::ScrollUp => app.scroll_up(SCROLL_STEP),
        _ => {}
    }
}
