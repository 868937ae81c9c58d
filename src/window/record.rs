use std::collections::BTreeMap;

use crate::geometry::{Bounds, Geometry, Size};
use crate::icons::Icon;
use crate::layout::snap::SnapZone;
use crate::window::controls::Controls;
use crate::window::{WindowFlags, WindowId, WindowState};

/// Marker for a gesture currently acting on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureVisual {
    #[default]
    Idle,
    Moving,
    Resizing,
}

/// How a surface is placed when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Hidden,
    Maximized,
    Docked(SnapZone),
    Floating,
}

/// Visual container of one window.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    pub(crate) geometry: Geometry,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) gesture: GestureVisual,
    pub(crate) dock: Option<SnapZone>,
}

impl Surface {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Style attributes the manager does not interpret.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn gesture(&self) -> GestureVisual {
        self.gesture
    }

    pub fn dock(&self) -> Option<SnapZone> {
        self.dock
    }
}

#[derive(Debug)]
pub struct WindowRecord<C> {
    id: WindowId,
    pub(crate) surface: Surface,
    title: String,
    icon: Icon,
    pub(crate) flags: WindowFlags,
    pub(crate) controls: Controls,
    content: C,
}

impl<C> WindowRecord<C> {
    pub(crate) fn new(
        id: WindowId,
        surface: Surface,
        title: String,
        icon: Icon,
        controls: Controls,
        content: C,
    ) -> Self {
        Self {
            id,
            surface,
            title,
            icon,
            flags: WindowFlags::default(),
            controls,
            content,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn state(&self) -> WindowState {
        self.flags.state()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn visual_state(&self) -> VisualState {
        match self.state() {
            WindowState::Minimized => VisualState::Hidden,
            WindowState::Maximized => VisualState::Maximized,
            WindowState::Normal => match self.surface.dock {
                Some(zone) if zone.is_dockable() => VisualState::Docked(zone),
                _ => VisualState::Floating,
            },
        }
    }

    /// Rendered rectangle relative to the container origin.
    ///
    /// Hidden windows report the rectangle they would occupy once restored.
    pub fn layout(&self, container: Bounds, fallback: Size) -> Bounds {
        if self.flags.maximized {
            return Bounds::new(0, 0, container.width, container.height);
        }
        match self.surface.dock {
            Some(zone) if zone.is_dockable() => zone.dock_rect(container),
            _ => self
                .surface
                .geometry
                .resolve(Size::new(container.width, container.height), fallback),
        }
    }
}
