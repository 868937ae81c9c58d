//! Dock zones offered while a window is dragged near the container edges.

use crate::config::SnapConfig;
use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalZone {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalZone {
    Top,
    Middle,
    Bottom,
}

/// Region under the pointer. A window only docks when `vertical` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapZone {
    pub horizontal: HorizontalZone,
    pub vertical: Option<VerticalZone>,
}

impl SnapZone {
    pub const fn new(horizontal: HorizontalZone, vertical: VerticalZone) -> Self {
        Self {
            horizontal,
            vertical: Some(vertical),
        }
    }

    pub fn is_dockable(&self) -> bool {
        self.vertical.is_some()
    }

    /// Rectangle a window docked in this zone occupies, relative to the
    /// container origin: the left or right half, and the upper half, full
    /// height or lower half.
    pub fn dock_rect(&self, container: Bounds) -> Bounds {
        let half_w = container.width / 2;
        let half_h = container.height / 2;
        let (x, width) = match self.horizontal {
            HorizontalZone::Left => (0, half_w),
            HorizontalZone::Right => (half_w, container.width - half_w),
        };
        let (y, height) = match self.vertical {
            Some(VerticalZone::Top) => (0, half_h),
            Some(VerticalZone::Bottom) => (half_h, container.height - half_h),
            Some(VerticalZone::Middle) | None => (0, container.height),
        };
        Bounds::new(x, y, width, height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapZoneDetector {
    config: SnapConfig,
}

impl SnapZoneDetector {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Zone under an absolute pointer position, if any.
    pub fn detect(&self, pointer: Point, container: Bounds) -> Option<SnapZone> {
        if !self.config.enabled {
            return None;
        }
        let local = container.relative(pointer);
        let threshold = self.config.edge_threshold;
        let horizontal = if local.x <= threshold {
            HorizontalZone::Left
        } else if local.x >= container.width - threshold {
            HorizontalZone::Right
        } else {
            return None;
        };
        let height = container.height as f32;
        let y = local.y as f32;
        let vertical = if y <= height * self.config.top_band {
            Some(VerticalZone::Top)
        } else if y <= height * self.config.middle_band {
            Some(VerticalZone::Middle)
        } else if y <= height {
            Some(VerticalZone::Bottom)
        } else {
            None
        };
        Some(SnapZone {
            horizontal,
            vertical,
        })
    }
}

/// Currently highlighted zone while a move gesture is live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapOverlay {
    highlighted: Option<SnapZone>,
}

impl SnapOverlay {
    pub fn current(&self) -> Option<SnapZone> {
        self.highlighted
    }

    pub fn reset(&mut self) {
        self.highlighted = None;
    }

    /// Reset, then highlight whatever zone the pointer is over now.
    pub fn update(&mut self, detector: &SnapZoneDetector, pointer: Point, container: Bounds) {
        self.reset();
        self.highlighted = detector.detect(pointer, container);
    }

    /// Consume the highlight, returning it only if a window may dock there.
    pub fn take_dockable(&mut self) -> Option<SnapZone> {
        self.highlighted.take().filter(SnapZone::is_dockable)
    }
}
