//! Pointer input as seen by the window manager.
//!
//! Hosts translate their native events into [`PointerEvent`]s; the crossterm
//! translation used by the terminal shell lives here too.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down(PointerButton),
    Move,
    Up(PointerButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
    pub at: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            at: Instant::now(),
        }
    }

    pub fn down(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Down(PointerButton::Primary), x, y)
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Up(PointerButton::Primary), x, y)
    }

    pub fn at(mut self, at: Instant) -> Self {
        self.at = at;
        self
    }

    pub fn is_primary_down(&self) -> bool {
        matches!(self.kind, PointerKind::Down(PointerButton::Primary))
    }
}

fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

/// Translate a terminal mouse event into a pointer event, one cell per pixel.
///
/// Scroll events have no pointer meaning and yield `None`.
pub fn pointer_from_mouse(mouse: &MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(button) => PointerKind::Down(map_button(button)),
        MouseEventKind::Up(button) => PointerKind::Up(map_button(button)),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => PointerKind::Move,
        _ => return None,
    };
    Some(PointerEvent::new(
        kind,
        mouse.column as i32,
        mouse.row as i32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn translates_press_drag_release() {
        let down = pointer_from_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 2))
            .expect("down");
        assert!(down.is_primary_down());
        assert_eq!(down.position, Point::new(4, 2));

        let drag = pointer_from_mouse(&mouse(MouseEventKind::Drag(MouseButton::Left), 9, 3))
            .expect("drag");
        assert_eq!(drag.kind, PointerKind::Move);

        let up = pointer_from_mouse(&mouse(MouseEventKind::Up(MouseButton::Right), 9, 3))
            .expect("up");
        assert_eq!(up.kind, PointerKind::Up(PointerButton::Secondary));
    }

    #[test]
    fn scroll_is_ignored() {
        assert!(pointer_from_mouse(&mouse(MouseEventKind::ScrollUp, 0, 0)).is_none());
    }
}
