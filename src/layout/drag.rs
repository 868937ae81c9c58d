use crate::config::ResizeLimits;
use crate::geometry::{Bounds, Geometry, Length, Point, Size};
use crate::layout::snap::SnapZone;
use crate::window::WindowId;

/// One of the eight resize handles around a window surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Top,
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
    ];

    /// Short handle name: `t`, `r`, `b`, `l`, `t-l`, `t-r`, `b-r`, `b-l`.
    pub fn name(self) -> &'static str {
        match self {
            ResizeHandle::Top => "t",
            ResizeHandle::Right => "r",
            ResizeHandle::Bottom => "b",
            ResizeHandle::Left => "l",
            ResizeHandle::TopLeft => "t-l",
            ResizeHandle::TopRight => "t-r",
            ResizeHandle::BottomRight => "b-r",
            ResizeHandle::BottomLeft => "b-l",
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Left | ResizeHandle::TopLeft | ResizeHandle::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Right | ResizeHandle::TopRight | ResizeHandle::BottomRight
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight
        )
    }

    pub fn cursor(self) -> Cursor {
        match self {
            ResizeHandle::Top => Cursor::NResize,
            ResizeHandle::Right => Cursor::EResize,
            ResizeHandle::Bottom => Cursor::SResize,
            ResizeHandle::Left => Cursor::WResize,
            ResizeHandle::TopLeft => Cursor::NwResize,
            ResizeHandle::TopRight => Cursor::NeResize,
            ResizeHandle::BottomRight => Cursor::SeResize,
            ResizeHandle::BottomLeft => Cursor::SwResize,
        }
    }
}

/// Cursor shown over the container while a resize gesture is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    NResize,
    EResize,
    SResize,
    WResize,
    NwResize,
    NeResize,
    SeResize,
    SwResize,
}

impl Cursor {
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::NResize => "n-resize",
            Cursor::EResize => "e-resize",
            Cursor::SResize => "s-resize",
            Cursor::WResize => "w-resize",
            Cursor::NwResize => "nw-resize",
            Cursor::NeResize => "ne-resize",
            Cursor::SeResize => "se-resize",
            Cursor::SwResize => "sw-resize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragHandle {
    Heading,
    Resize(ResizeHandle),
}

/// State of the single live pointer gesture.
///
/// Positions are relative to the container origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub window: WindowId,
    pub handle: DragHandle,
    pub pointer_origin: Point,
    pub window_origin: Point,
    pub start_rect: Bounds,
    pub start_geometry: Geometry,
    pub start_dock: Option<SnapZone>,
}

impl DragState {
    pub fn delta(&self, pointer: Point) -> Point {
        Point::new(
            pointer.x - self.pointer_origin.x,
            pointer.y - self.pointer_origin.y,
        )
    }

    pub fn is_move(&self) -> bool {
        self.handle == DragHandle::Heading
    }

    pub fn resize_handle(&self) -> Option<ResizeHandle> {
        match self.handle {
            DragHandle::Resize(handle) => Some(handle),
            DragHandle::Heading => None,
        }
    }
}

/// Window origin for a move gesture: start offset plus pointer delta, with
/// the top edge kept inside the container.
pub fn move_origin(window_origin: Point, delta: Point) -> Point {
    Point::new(window_origin.x + delta.x, (window_origin.y + delta.y).max(0))
}

/// Rectangle after dragging `handle` by `delta` from `start`.
///
/// Only the edges named by the handle move; the opposite edges stay where
/// they were when the gesture began. The top edge never leaves the
/// container: when a window's bottom sits closer to the container top than
/// `min_height`, the height shrinks to that distance instead.
pub fn resize_rect(start: Bounds, handle: ResizeHandle, delta: Point, limits: &ResizeLimits) -> Bounds {
    let mut left = start.x;
    let mut right = start.right();
    let mut top = start.y;
    let mut bottom = start.bottom();

    if handle.moves_left() {
        left = right - limits.clamp_width(right - (start.x + delta.x));
    } else if handle.moves_right() {
        right = left + limits.clamp_width(start.right() + delta.x - left);
    }
    if handle.moves_top() {
        let proposed = (start.y + delta.y).max(0);
        top = (bottom - limits.clamp_height(bottom - proposed)).max(0);
    } else if handle.moves_bottom() {
        bottom = top + limits.clamp_height(start.bottom() + delta.y - top);
    }

    Bounds::new(left, top, right - left, bottom - top)
}

/// Write the edges named by `handle` into an inset-model geometry.
pub fn apply_resize(geometry: &mut Geometry, handle: ResizeHandle, rect: Bounds, container: Size) {
    if handle.moves_left() {
        geometry.left = Some(Length::Px(rect.x));
        geometry.width = None;
    }
    if handle.moves_right() {
        geometry.right = Some(Length::Px(container.width - rect.right()));
        geometry.width = None;
    }
    if handle.moves_top() {
        geometry.top = Some(Length::Px(rect.y));
        geometry.height = None;
    }
    if handle.moves_bottom() {
        geometry.bottom = Some(Length::Px(container.height - rect.bottom()));
        geometry.height = None;
    }
}
