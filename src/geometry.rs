//! Pixel geometry shared by the window manager.
//!
//! Every coordinate is an `i32` pixel. Window geometry is stored relative to
//! the container origin; pointer positions are absolute and get rebased with
//! [`Bounds::relative`] before comparing them against window geometry.

use std::fmt;
use std::str::FromStr;

use ratatui::prelude::Rect;

use crate::style::StyleError;

/// Largest magnitude a pixel length may take. Parsed values beyond it are
/// clamped so rectangle arithmetic stays far from `i32` overflow.
pub const MAX_PX: i32 = 1 << 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Signed rectangle with origin and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Rebase an absolute point onto this rectangle's origin.
    pub fn relative(&self, point: Point) -> Point {
        Point::new(point.x.saturating_sub(self.x), point.y.saturating_sub(self.y))
    }

    /// Move a rectangle expressed relative to `self` into absolute space.
    pub fn absolute(&self, inner: Bounds) -> Bounds {
        Bounds {
            x: inner.x.saturating_add(self.x),
            y: inner.y.saturating_add(self.y),
            ..inner
        }
    }

    /// Visible part of `self` within `clip`, as an unsigned terminal rect.
    pub fn clip_to(&self, clip: Rect) -> Rect {
        let left = self.x.max(clip.x as i32);
        let top = self.y.max(clip.y as i32);
        let right = self.right().min(clip.x as i32 + clip.width as i32);
        let bottom = self.bottom().min(clip.y as i32 + clip.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width as i32,
            height: rect.height as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(i32),
    /// Percent of the container extent on the same axis, in `0.0..=100.0`.
    Percent(f32),
}

impl Length {
    /// Pixel length from a parsed number, rounded and clamped to [`MAX_PX`].
    pub fn px(value: f64) -> Self {
        Length::Px(clamp_px(value))
    }

    pub fn resolve(self, extent: i32) -> i32 {
        match self {
            Length::Px(px) => px.clamp(-MAX_PX, MAX_PX),
            Length::Percent(pct) => clamp_px(f64::from(extent) * f64::from(pct) / 100.0),
        }
    }
}

fn clamp_px(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(-f64::from(MAX_PX), f64::from(MAX_PX)) as i32
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{px}px"),
            Length::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl FromStr for Length {
    type Err = StyleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        if let Some(pct) = value.strip_suffix('%') {
            return pct
                .trim()
                .parse::<f32>()
                .map(Length::Percent)
                .map_err(|_| StyleError::InvalidLength(raw.to_string()));
        }
        let number = value.strip_suffix("px").unwrap_or(value).trim();
        number
            .parse::<f64>()
            .map(Length::px)
            .map_err(|_| StyleError::InvalidLength(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Explicit placement of a window surface.
///
/// Mirrors the absolute-positioning box model: each axis is determined by
/// whichever of start offset, end inset and length are present. `None` means
/// the property is unset (`auto`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub left: Option<Length>,
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
}

impl Geometry {
    /// Resolve into a rectangle relative to the container origin.
    ///
    /// `fallback` supplies the intrinsic size used when an axis has neither a
    /// length nor both insets.
    pub fn resolve(&self, container: Size, fallback: Size) -> Bounds {
        let (x, width) = resolve_axis(
            self.left,
            self.right,
            self.width,
            container.width,
            fallback.width,
        );
        let (y, height) = resolve_axis(
            self.top,
            self.bottom,
            self.height,
            container.height,
            fallback.height,
        );
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Replace every property with pixel insets describing `rect`, leaving
    /// width and height unset so the four edges control the size.
    pub fn to_insets(rect: Bounds, container: Size) -> Self {
        Self {
            left: Some(Length::Px(rect.x)),
            top: Some(Length::Px(rect.y)),
            right: Some(Length::Px(container.width.saturating_sub(rect.right()))),
            bottom: Some(Length::Px(container.height.saturating_sub(rect.bottom()))),
            width: None,
            height: None,
        }
    }
}

fn resolve_axis(
    start: Option<Length>,
    end: Option<Length>,
    length: Option<Length>,
    extent: i32,
    fallback: i32,
) -> (i32, i32) {
    let start = start.map(|v| v.resolve(extent));
    let end = end.map(|v| v.resolve(extent));
    let length = length.map(|v| v.resolve(extent));
    let (offset, len) = match (start, end, length) {
        // Over-constrained: the end inset loses, as in left-to-right layout.
        (Some(s), _, Some(l)) => (s, l),
        (Some(s), Some(e), None) => (s, extent.saturating_sub(s).saturating_sub(e)),
        (None, Some(e), Some(l)) => (extent.saturating_sub(e).saturating_sub(l), l),
        (Some(s), None, None) => (s, fallback),
        (None, Some(e), None) => (extent.saturating_sub(e).saturating_sub(fallback), fallback),
        (None, None, Some(l)) => (0, l),
        (None, None, None) => (0, fallback),
    };
    (offset, len.max(0))
}
