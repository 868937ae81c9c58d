//! A desktop hosted in the terminal: one [`WindowManager`] laid over the
//! screen, a status line at the bottom, crossterm input and ratatui output.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use indoc::indoc;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::config::{ConfigError, WmConfig};
use crate::geometry::Bounds;
use crate::icons::ThemeIcons;
use crate::input::pointer_from_mouse;
use crate::tracing_sub::LogBuffer;
use crate::window::decorator::{DecoratedWindow, TerminalDecorator, WindowDecorator};
use crate::window::{
    WindowCallbacks, WindowEventKind, WindowId, WindowManager, WindowRecord, WindowRequest,
};

pub const WELCOME: &str = indoc! {"
    Drag a heading to move a window.
    Drop it against the left or right edge to dock it.
    Drag a border to resize.

    n  new window      a  pin / unpin
    m  minimize        r  restore all
    Esc  cancel drag   q  quit
"};

const ICON_THEME: &str = "desk";

const STATUS_HINT: &str = " n:new a:pin m:min r:restore q:quit ";

/// What a shell window displays.
#[derive(Debug, Clone)]
pub enum WindowContent {
    Text(String),
    Log(LogBuffer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Continue,
    Quit,
}

pub struct DesktopShell {
    wm: WindowManager<WindowContent>,
    decorator: Box<dyn WindowDecorator>,
    opened: usize,
}

fn container_for(area: Rect) -> Bounds {
    let mut bounds = Bounds::from(area);
    // last row is the status line
    bounds.height = (bounds.height - 1).max(0);
    bounds
}

fn logging_callbacks() -> WindowCallbacks<WindowContent> {
    WindowCallbacks::new().on_each(
        &[
            WindowEventKind::Focus,
            WindowEventKind::Above,
            WindowEventKind::Below,
            WindowEventKind::MoveEnd,
            WindowEventKind::Minimize,
            WindowEventKind::Maximize,
            WindowEventKind::Close,
        ],
        |record: &WindowRecord<WindowContent>, event, _| {
            tracing::info!(window_id = %record.id(), title = record.title(), ?event, "window event");
        },
    )
}

impl DesktopShell {
    pub fn new(config: WmConfig, area: Rect) -> Result<Self, ConfigError> {
        let decorator = TerminalDecorator::new(config.chrome);
        Self::with_decorator(config, area, Box::new(decorator))
    }

    /// The manager hit-tests with the decorator's chrome, whatever
    /// `config.chrome` says, so clicks land on what was painted.
    pub fn with_decorator(
        mut config: WmConfig,
        area: Rect,
        decorator: Box<dyn WindowDecorator>,
    ) -> Result<Self, ConfigError> {
        config.chrome = *decorator.chrome();
        let mut wm = WindowManager::with_config(config, container_for(area))?;
        wm.set_icon_resolver(Box::new(ThemeIcons::new(ICON_THEME)));
        Ok(Self {
            wm,
            decorator,
            opened: 0,
        })
    }

    pub fn manager(&self) -> &WindowManager<WindowContent> {
        &self.wm
    }

    pub fn manager_mut(&mut self) -> &mut WindowManager<WindowContent> {
        &mut self.wm
    }

    pub fn open_text_window(&mut self, title: impl Into<String>, body: impl Into<String>) -> WindowId {
        self.opened += 1;
        self.wm.create_window(
            WindowRequest::new(WindowContent::Text(body.into()))
                .title(title)
                .icon("text")
                .events(logging_callbacks()),
        )
    }

    /// Open a window following `log`. Only one log window is kept open.
    pub fn open_log_window(&mut self, log: LogBuffer) -> WindowId {
        if let Some(existing) = self.log_window() {
            return existing;
        }
        self.wm.create_window(
            WindowRequest::new(WindowContent::Log(log))
                .title("Log")
                .icon("log")
                .events(logging_callbacks()),
        )
    }

    fn log_window(&self) -> Option<WindowId> {
        self.wm.ids().into_iter().find(|id| {
            self.wm
                .window(*id)
                .is_some_and(|record| matches!(record.content(), WindowContent::Log(_)))
        })
    }

    pub fn resize(&mut self, area: Rect) {
        self.wm.set_container(container_for(area));
    }

    pub fn handle_event(&mut self, event: &Event) -> ShellAction {
        match event {
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_from_mouse(mouse) {
                    self.wm.handle_pointer(&pointer);
                }
                ShellAction::Continue
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::FocusLost => {
                self.wm.cancel_gesture();
                ShellAction::Continue
            }
            Event::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height));
                ShellAction::Continue
            }
            _ => ShellAction::Continue,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ShellAction {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ShellAction::Quit
            }
            KeyCode::Char('q') => ShellAction::Quit,
            KeyCode::Char('n') => {
                let title = format!("Window {}", self.opened + 1);
                self.open_text_window(title, WELCOME);
                ShellAction::Continue
            }
            KeyCode::Char('a') => {
                self.toggle_pin();
                ShellAction::Continue
            }
            KeyCode::Char('m') => {
                if let Some(id) = self.wm.focused() {
                    self.wm.minimize(id, None);
                }
                ShellAction::Continue
            }
            KeyCode::Char('r') => {
                self.restore_all();
                ShellAction::Continue
            }
            KeyCode::Esc => {
                self.wm.cancel_gesture();
                ShellAction::Continue
            }
            _ => ShellAction::Continue,
        }
    }

    // Pins the focused window; with nothing focused, unpins the topmost pinned one.
    fn toggle_pin(&mut self) {
        if let Some(id) = self.wm.focused() {
            self.wm.window_above(id, None);
            return;
        }
        let pinned = self
            .wm
            .render_order()
            .into_iter()
            .rev()
            .find(|id| self.wm.window(*id).is_some_and(|r| r.flags().above));
        if let Some(id) = pinned {
            self.wm.window_below(id, None);
            self.wm.focus_window(id, None);
        }
    }

    pub fn restore_all(&mut self) {
        let minimized: Vec<WindowId> = self
            .wm
            .ids()
            .into_iter()
            .filter(|id| self.wm.window(*id).is_some_and(|r| r.flags().minimized))
            .collect();
        tracing::debug!(count = minimized.len(), "restoring minimized windows");
        for id in minimized {
            self.wm.toggle(id, None);
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        self.render_buffer(area, frame.buffer_mut());
    }

    pub fn render_buffer(&self, area: Rect, buffer: &mut Buffer) {
        let desktop = self.wm.container().clip_to(area);
        buffer.set_style(desktop, Style::default().bg(Color::Rgb(24, 28, 40)));

        for draw in self.wm.render_plan() {
            let Some(record) = self.wm.window(draw.id) else {
                continue;
            };
            let content = self.decorator.render_window(
                buffer,
                &DecoratedWindow {
                    rect: draw.rect,
                    title: record.title(),
                    icon: record.icon(),
                    buttons: record.controls().buttons(),
                    toggle: record.controls().toggle_affordance(),
                    focused: draw.focused,
                    gesture: draw.gesture,
                },
            );
            let visible = content.clip_to(desktop);
            if visible.is_empty() {
                continue;
            }
            let text = match record.content() {
                WindowContent::Text(body) => body.clone(),
                WindowContent::Log(log) => log.tail(visible.height as usize).join("\n"),
            };
            Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(Color::Gray))
                .render(visible, buffer);
        }

        if let Some(preview) = self.wm.snap_preview() {
            buffer.set_style(
                preview.clip_to(desktop),
                Style::default().bg(Color::Rgb(40, 70, 130)),
            );
        }

        self.render_status(area, buffer);
    }

    fn render_status(&self, area: Rect, buffer: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let mut spans = vec![Span::styled(
            STATUS_HINT,
            Style::default().fg(Color::Black).bg(Color::Gray),
        )];
        for id in self.wm.ids() {
            if let Some(record) = self.wm.window(id)
                && record.flags().minimized
            {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("[{}]", record.title()),
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            }
        }
        Paragraph::new(Line::from(spans)).render(row, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use crate::icons::Icon;
    use crate::layout::hit_test::ChromeMetrics;

    fn shell() -> DesktopShell {
        DesktopShell::new(WmConfig::terminal(), Rect::new(0, 0, 60, 20)).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(shell: &DesktopShell) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| shell.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn renders_titles_and_status_line() {
        let mut shell = shell();
        shell.open_text_window("Notes", "hello world");
        let lines = screen(&shell);
        assert!(lines.iter().any(|line| line.contains("Notes")));
        assert!(lines.iter().any(|line| line.contains("hello world")));
        assert!(lines[19].contains("n:new"));
    }

    #[test]
    fn mouse_drag_on_heading_moves_window() {
        let mut shell = shell();
        let id = shell.open_text_window("Notes", "");
        // cascade puts the first window at (2, 2); its heading is row 3
        assert_eq!(shell.manager().layout(id), Some(Bounds::new(2, 2, 40, 12)));
        shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3));
        shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 15, 6));
        shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 15, 6));
        assert_eq!(shell.manager().layout(id), Some(Bounds::new(7, 5, 40, 12)));
    }

    #[test]
    fn keys_drive_window_lifecycle() {
        let mut shell = shell();
        assert_eq!(shell.handle_event(&key(KeyCode::Char('n'))), ShellAction::Continue);
        assert_eq!(shell.handle_event(&key(KeyCode::Char('n'))), ShellAction::Continue);
        let wm = shell.manager();
        assert_eq!(wm.len(), 2);
        let second = wm.focused().unwrap();

        shell.handle_event(&key(KeyCode::Char('m')));
        assert!(shell.manager().window(second).unwrap().flags().minimized);
        assert!(screen(&shell)[19].contains("[Window 2]"));

        shell.handle_event(&key(KeyCode::Char('r')));
        assert!(!shell.manager().window(second).unwrap().flags().minimized);

        // minimizing handed focus to the first window
        let first = shell.manager().focused().unwrap();
        assert_ne!(first, second);
        shell.handle_event(&key(KeyCode::Char('a')));
        assert!(shell.manager().window(first).unwrap().flags().above);
        assert!(shell.manager().focused().is_none());
        shell.handle_event(&key(KeyCode::Char('a')));
        assert!(!shell.manager().window(first).unwrap().flags().above);
        assert_eq!(shell.manager().focused(), Some(first));

        assert_eq!(shell.handle_event(&key(KeyCode::Char('q'))), ShellAction::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(shell.handle_event(&ctrl_c), ShellAction::Quit);
    }

    #[test]
    fn escape_cancels_a_drag() {
        let mut shell = shell();
        let id = shell.open_text_window("Notes", "");
        shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3));
        shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 30, 9));
        shell.handle_event(&key(KeyCode::Esc));
        assert!(shell.manager().drag().is_none());
        assert_eq!(shell.manager().layout(id), Some(Bounds::new(2, 2, 40, 12)));
    }

    #[test]
    fn losing_terminal_focus_cancels_a_resize() {
        let mut shell = shell();
        let id = shell.open_text_window("Notes", "");
        // right border of the (2, 2, 40, 12) window
        shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 41, 8));
        shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 50, 8));
        assert_eq!(shell.manager().layout(id).map(|r| r.width), Some(49));
        shell.handle_event(&Event::FocusLost);
        assert!(shell.manager().drag().is_none());
        assert_eq!(shell.manager().layout(id), Some(Bounds::new(2, 2, 40, 12)));
    }

    #[test]
    fn dragging_to_the_edge_previews_then_docks() {
        let mut shell = shell();
        let id = shell.open_text_window("Notes", "");
        shell.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3));
        shell.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 1, 3));
        assert!(shell.manager().snap_preview().is_some());
        screen(&shell);
        shell.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 1, 3));
        // left half, upper half of the 19-row desktop
        assert_eq!(shell.manager().layout(id), Some(Bounds::new(0, 0, 30, 9)));
    }

    #[test]
    fn log_window_shows_buffer_tail() {
        let mut shell = shell();
        let log = LogBuffer::new(50);
        log.push("first entry");
        log.push("latest entry");
        let id = shell.open_log_window(log.clone());
        assert_eq!(shell.open_log_window(log), id);
        let lines = screen(&shell);
        assert!(lines.iter().any(|line| line.contains("latest entry")));
    }

    #[test]
    fn terminal_resize_updates_container() {
        let mut shell = shell();
        shell.handle_event(&Event::Resize(100, 40));
        assert_eq!(shell.manager().container(), Bounds::new(0, 0, 100, 39));
    }

    #[test]
    fn manager_hit_tests_with_the_decorator_chrome() {
        let chrome = ChromeMetrics {
            handle_thickness: 1,
            heading_height: 2,
            button_width: 4,
        };
        let shell = DesktopShell::with_decorator(
            WmConfig::terminal(),
            Rect::new(0, 0, 60, 20),
            Box::new(TerminalDecorator::new(chrome)),
        )
        .unwrap();
        assert_eq!(shell.manager().config().chrome, chrome);
    }

    #[test]
    fn named_icons_use_the_shell_theme() {
        let mut shell = shell();
        let id = shell.open_text_window("Notes", "body");
        let icon = shell.manager().window(id).unwrap().icon().clone();
        assert_eq!(
            icon,
            Icon::Named {
                prefix: Some(ICON_THEME.to_string()),
                name: "text".into(),
            }
        );
    }
}
