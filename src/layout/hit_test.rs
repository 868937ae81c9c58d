use crate::config::ConfigError;
use crate::geometry::{Bounds, Point};
use crate::layout::drag::ResizeHandle;
use crate::window::ControlButton;

/// Sizes of the window chrome the manager hit-tests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    /// Thickness of the resize band along each edge; corners are squares of
    /// this size.
    pub handle_thickness: i32,
    pub heading_height: i32,
    pub button_width: i32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            handle_thickness: 4,
            heading_height: 28,
            button_width: 28,
        }
    }
}

impl ChromeMetrics {
    /// One cell of border, one row of heading, three cells per button.
    pub fn terminal() -> Self {
        Self {
            handle_thickness: 1,
            heading_height: 1,
            button_width: 3,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.handle_thickness < 0 {
            return Err(ConfigError::NegativeChrome("handle_thickness"));
        }
        if self.heading_height < 0 {
            return Err(ConfigError::NegativeChrome("heading_height"));
        }
        if self.button_width < 0 {
            return Err(ConfigError::NegativeChrome("button_width"));
        }
        Ok(())
    }

    /// Heading strip, inside the resize band.
    pub fn heading_rect(&self, rect: Bounds) -> Bounds {
        let t = self.handle_thickness;
        Bounds::new(
            rect.x + t,
            rect.y + t,
            (rect.width - 2 * t).max(0),
            self.heading_height.min((rect.height - 2 * t).max(0)),
        )
    }

    /// Content area below the heading.
    pub fn content_rect(&self, rect: Bounds) -> Bounds {
        let heading = self.heading_rect(rect);
        let t = self.handle_thickness;
        Bounds::new(
            heading.x,
            heading.bottom(),
            heading.width,
            (rect.bottom() - t - heading.bottom()).max(0),
        )
    }

    /// Control buttons, right-aligned in the heading in the given order.
    pub fn control_rects(&self, rect: Bounds, buttons: &[ControlButton]) -> Vec<(ControlButton, Bounds)> {
        let heading = self.heading_rect(rect);
        let mut x = heading.right() - self.button_width * buttons.len() as i32;
        buttons
            .iter()
            .map(|button| {
                let bounds = Bounds::new(x, heading.y, self.button_width, heading.height);
                x += self.button_width;
                (*button, bounds)
            })
            .filter(|(_, bounds)| bounds.x >= heading.x)
            .collect()
    }

    pub fn resize_handle_at(&self, rect: Bounds, point: Point) -> Option<ResizeHandle> {
        let t = self.handle_thickness;
        if t == 0 || !rect.contains(point) {
            return None;
        }
        let near_left = point.x < rect.x + t;
        let near_right = point.x >= rect.right() - t;
        let near_top = point.y < rect.y + t;
        let near_bottom = point.y >= rect.bottom() - t;
        match (near_top, near_bottom, near_left, near_right) {
            (true, _, true, _) => Some(ResizeHandle::TopLeft),
            (true, _, _, true) => Some(ResizeHandle::TopRight),
            (_, true, true, _) => Some(ResizeHandle::BottomLeft),
            (_, true, _, true) => Some(ResizeHandle::BottomRight),
            (true, _, _, _) => Some(ResizeHandle::Top),
            (_, true, _, _) => Some(ResizeHandle::Bottom),
            (_, _, true, _) => Some(ResizeHandle::Left),
            (_, _, _, true) => Some(ResizeHandle::Right),
            _ => None,
        }
    }
}

/// Part of a window under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Resize(ResizeHandle),
    Control(ControlButton),
    Heading,
    Content,
}

/// Classify `point` against a window occupying `rect`.
///
/// Resize handles are only offered when `resizable` is set (maximized
/// windows have none).
pub fn hit_test_window(
    chrome: &ChromeMetrics,
    rect: Bounds,
    buttons: &[ControlButton],
    resizable: bool,
    point: Point,
) -> Option<HitTarget> {
    if !rect.contains(point) {
        return None;
    }
    if resizable && let Some(handle) = chrome.resize_handle_at(rect, point) {
        return Some(HitTarget::Resize(handle));
    }
    if let Some((button, _)) = chrome
        .control_rects(rect, buttons)
        .into_iter()
        .find(|(_, bounds)| bounds.contains(point))
    {
        return Some(HitTarget::Control(button));
    }
    if chrome.heading_rect(rect).contains(point) {
        return Some(HitTarget::Heading);
    }
    Some(HitTarget::Content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Bounds = Bounds::new(100, 100, 300, 200);

    fn chrome() -> ChromeMetrics {
        ChromeMetrics {
            handle_thickness: 4,
            heading_height: 20,
            button_width: 16,
        }
    }

    #[test]
    fn corners_win_over_edges() {
        let c = chrome();
        assert_eq!(
            c.resize_handle_at(RECT, Point::new(101, 101)),
            Some(ResizeHandle::TopLeft)
        );
        assert_eq!(
            c.resize_handle_at(RECT, Point::new(399, 299)),
            Some(ResizeHandle::BottomRight)
        );
        assert_eq!(
            c.resize_handle_at(RECT, Point::new(250, 298)),
            Some(ResizeHandle::Bottom)
        );
        assert_eq!(
            c.resize_handle_at(RECT, Point::new(398, 200)),
            Some(ResizeHandle::Right)
        );
        assert_eq!(c.resize_handle_at(RECT, Point::new(250, 200)), None);
    }

    #[test]
    fn buttons_are_right_aligned_in_heading() {
        let buttons = [
            ControlButton::Minimize,
            ControlButton::Toggle,
            ControlButton::Close,
        ];
        let rects = chrome().control_rects(RECT, &buttons);
        assert_eq!(rects.len(), 3);
        let (last, close) = rects[2];
        assert_eq!(last, ControlButton::Close);
        assert_eq!(close.right(), RECT.right() - 4);
        assert_eq!(close.y, RECT.y + 4);
    }

    #[test]
    fn classifies_heading_controls_and_content() {
        let c = chrome();
        let buttons = [ControlButton::Close];
        let hit = |x, y| hit_test_window(&c, RECT, &buttons, true, Point::new(x, y));
        assert_eq!(hit(150, 110), Some(HitTarget::Heading));
        assert_eq!(hit(390, 110), Some(HitTarget::Control(ControlButton::Close)));
        assert_eq!(hit(150, 200), Some(HitTarget::Content));
        assert_eq!(hit(100, 200), Some(HitTarget::Resize(ResizeHandle::Left)));
        assert_eq!(hit(50, 50), None);
    }

    #[test]
    fn non_resizable_windows_expose_no_handles() {
        let hit = hit_test_window(&chrome(), RECT, &[], false, Point::new(100, 100));
        assert_eq!(hit, Some(HitTarget::Content));
    }

    #[test]
    fn content_sits_below_heading() {
        let content = chrome().content_rect(RECT);
        assert_eq!(content, Bounds::new(104, 124, 292, 172));
    }
}
