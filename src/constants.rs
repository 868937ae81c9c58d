//! Shared crate-wide constants.

/// Title shown for windows created without one.
pub const DEFAULT_TITLE: &str = "Unknown";

/// Offset step, in pixels, between consecutive windows so new windows do not
/// exactly cover the previous one. A window with id `n` starts at `n * step`.
pub const CASCADE_STEP: i32 = 10;

/// Distance from the left or right container edge, in pixels, within which a
/// dragged window is offered a dock zone.
pub const SNAP_EDGE_THRESHOLD: i32 = 50;

/// Vertical band boundaries for dock zones, as fractions of the container
/// height. Above the first is the top band, above the second the middle band.
pub const SNAP_TOP_BAND: f32 = 1.0 / 3.0;
pub const SNAP_MIDDLE_BAND: f32 = 2.0 / 3.0;

/// Size given to windows whose geometry leaves an axis unconstrained.
pub const DEFAULT_WINDOW_WIDTH: i32 = 480;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 320;

/// Maximum delay between two heading presses that counts as a double click.
pub const DOUBLE_CLICK_MILLIS: u64 = 500;
