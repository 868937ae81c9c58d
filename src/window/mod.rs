pub mod controls;
pub mod decorator;
pub mod events;
pub mod record;

mod window_manager;

use std::fmt;

pub use controls::{ControlButton, Controls, ToggleAffordance};
pub use events::{WindowCallbacks, WindowEvent, WindowEventKind, WindowHandler};
pub use record::{GestureVisual, Surface, VisualState, WindowRecord};
pub use window_manager::{WindowDraw, WindowManager, WindowRequest};

/// Session-unique window identifier. Allocated in increasing order starting
/// at 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowFlags {
    pub above: bool,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowFlags {
    pub fn state(&self) -> WindowState {
        if self.minimized {
            WindowState::Minimized
        } else if self.maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}
