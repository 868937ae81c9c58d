//! Pointer-gesture geometry: drag state, resize math, snap zones and chrome
//! hit testing. Nothing in here owns windows; the manager feeds it rectangles
//! and applies the results.

pub mod drag;
pub mod hit_test;
pub mod snap;

pub use drag::{Cursor, DragHandle, DragState, ResizeHandle};
pub use hit_test::{ChromeMetrics, HitTarget, hit_test_window};
pub use snap::{HorizontalZone, SnapOverlay, SnapZone, SnapZoneDetector, VerticalZone};
