use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier, Style};

use crate::geometry::Bounds;
use crate::icons::Icon;
use crate::layout::hit_test::ChromeMetrics;
use crate::window::{ControlButton, GestureVisual, ToggleAffordance};

/// What a decorator needs to paint one window.
#[derive(Debug, Clone, Copy)]
pub struct DecoratedWindow<'a> {
    /// Absolute rectangle; may extend past the buffer.
    pub rect: Bounds,
    pub title: &'a str,
    pub icon: &'a Icon,
    pub buttons: &'a [ControlButton],
    pub toggle: ToggleAffordance,
    pub focused: bool,
    pub gesture: GestureVisual,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Chrome sizes the decorator paints with. The manager must hit-test
    /// with the same metrics.
    fn chrome(&self) -> &ChromeMetrics;

    /// Paint frame and heading, clearing the content area. Returns the
    /// content rectangle.
    fn render_window(&self, buffer: &mut Buffer, window: &DecoratedWindow<'_>) -> Bounds;
}

#[derive(Debug, Clone)]
pub struct TerminalDecorator {
    chrome: ChromeMetrics,
}

impl Default for TerminalDecorator {
    fn default() -> Self {
        Self::new(ChromeMetrics::terminal())
    }
}

impl TerminalDecorator {
    pub fn new(chrome: ChromeMetrics) -> Self {
        Self { chrome }
    }
}

pub fn button_symbol(button: ControlButton, toggle: ToggleAffordance) -> &'static str {
    match (button, toggle) {
        (ControlButton::Minimize, _) => "_",
        (ControlButton::Toggle, ToggleAffordance::Maximize) => "□",
        (ControlButton::Toggle, ToggleAffordance::Restore) => "❐",
        (ControlButton::Close, _) => "×",
    }
}

fn put(buffer: &mut Buffer, x: i32, y: i32, symbol: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if let Some(cell) = buffer.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn put_str(buffer: &mut Buffer, x: i32, y: i32, limit: i32, text: &str, style: Style) -> i32 {
    let mut cursor = x;
    for ch in text.chars() {
        if cursor >= limit {
            break;
        }
        let mut tmp = [0u8; 4];
        put(buffer, cursor, y, ch.encode_utf8(&mut tmp), style);
        cursor += 1;
    }
    cursor
}

/// Part of `area` that lands inside the buffer.
fn visible(buffer: &Buffer, area: Bounds) -> Bounds {
    Bounds::from(area.clip_to(buffer.area))
}

fn fill(buffer: &mut Buffer, area: Bounds, style: Style) {
    let area = visible(buffer, area);
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            put(buffer, x, y, " ", style);
        }
    }
}

impl WindowDecorator for TerminalDecorator {
    fn chrome(&self) -> &ChromeMetrics {
        &self.chrome
    }

    fn render_window(&self, buffer: &mut Buffer, window: &DecoratedWindow<'_>) -> Bounds {
        let rect = window.rect;
        if rect.is_empty() {
            return Bounds::new(rect.x, rect.y, 0, 0);
        }

        let border_style = match (window.gesture, window.focused) {
            (GestureVisual::Moving | GestureVisual::Resizing, _) => {
                Style::default().fg(Color::Yellow)
            }
            (GestureVisual::Idle, true) => Style::default().fg(Color::Cyan),
            (GestureVisual::Idle, false) => Style::default().fg(Color::DarkGray),
        };
        let header_style = if window.focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        let body_style = Style::default().bg(Color::Black).fg(Color::Gray);

        fill(buffer, rect, body_style);

        let shown = visible(buffer, rect);
        if self.chrome.handle_thickness > 0 && !shown.is_empty() {
            let (left, top) = (rect.x, rect.y);
            let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
            for x in shown.x..shown.right() {
                let (upper, lower) = if x == left {
                    ("┌", "└")
                } else if x == right {
                    ("┐", "┘")
                } else {
                    ("─", "─")
                };
                put(buffer, x, top, upper, border_style);
                put(buffer, x, bottom, lower, border_style);
            }
            for y in shown.y.max(top + 1)..shown.bottom().min(bottom) {
                put(buffer, left, y, "│", border_style);
                put(buffer, right, y, "│", border_style);
            }
        }

        let heading = self.chrome.heading_rect(rect);
        if !heading.is_empty() {
            fill(buffer, heading, header_style);
            let controls = self.chrome.control_rects(rect, window.buttons);
            let title_limit = controls
                .first()
                .map_or(heading.right(), |(_, bounds)| bounds.x);
            let mut glyph = [0u8; 4];
            let after_icon = put_str(
                buffer,
                heading.x + 1,
                heading.y,
                title_limit,
                window.icon.glyph().encode_utf8(&mut glyph),
                header_style,
            );
            put_str(
                buffer,
                after_icon + 1,
                heading.y,
                title_limit,
                window.title,
                header_style,
            );
            for (button, bounds) in controls {
                let x = bounds.x + bounds.width / 2;
                put(
                    buffer,
                    x,
                    bounds.y,
                    button_symbol(button, window.toggle),
                    header_style,
                );
            }
        }

        self.chrome.content_rect(rect)
    }
}
