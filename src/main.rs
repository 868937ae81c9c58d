use std::io::{self, Stdout, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use desk_wm::config::{ResizeLimits, WmConfig};
use desk_wm::shell::{DesktopShell, ShellAction, WELCOME};
use desk_wm::tracing_sub::{self, LogBuffer};

const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Desktop-style floating windows in the terminal"
)]
struct Cli {
    /// Distance in cells from the left/right edge that offers a dock zone.
    #[arg(long, value_name = "CELLS", default_value_t = 3)]
    snap_threshold: i32,

    /// Smallest width a resize may produce.
    #[arg(long, value_name = "CELLS")]
    min_width: Option<i32>,

    /// Smallest height a resize may produce.
    #[arg(long, value_name = "CELLS")]
    min_height: Option<i32>,

    /// Number of windows to open at startup.
    #[arg(short = 'w', long, default_value_t = 2)]
    windows: usize,

    /// Log to stderr instead of a log window.
    #[arg(long)]
    no_log_window: bool,
}

impl Cli {
    fn config(&self) -> WmConfig {
        let mut config = WmConfig::terminal();
        config.snap.edge_threshold = self.snap_threshold;
        config.resize = ResizeLimits {
            min_width: self.min_width,
            min_height: self.min_height,
            ..ResizeLimits::default()
        };
        config
    }
}

type DeskTerminal = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    let args = Cli::parse();
    let config = args.config();
    config.validate().map_err(io::Error::other)?;

    let log = (!args.no_log_window).then(LogBuffer::default);
    match &log {
        Some(buffer) => {
            tracing_sub::init_with_buffer(buffer.clone());
        }
        None => tracing_sub::init_default(),
    }

    let (width, height) = terminal::size()?;
    let mut shell = DesktopShell::new(config, ratatui::prelude::Rect::new(0, 0, width, height))
        .map_err(io::Error::other)?;
    for n in 1..=args.windows {
        shell.open_text_window(format!("Window {n}"), WELCOME);
    }
    if let Some(buffer) = log {
        shell.open_log_window(buffer);
    }

    let mut session = TerminalSession::enter()?;
    tracing_sub::install_panic_hook();
    let result = run(&mut session.terminal, &mut shell);
    session.exit()?;
    result
}

/// Raw mode plus alternate screen for the lifetime of the value. Dropping it
/// (including while unwinding from a panic) restores the terminal.
struct TerminalSession {
    terminal: DeskTerminal,
    entered: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        let mut session = Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            entered: true,
        };
        terminal::enable_raw_mode()?;
        enter_screen(session.terminal.backend_mut())?;
        Ok(session)
    }

    /// Runs every restore step even when an earlier one fails, reporting the
    /// first failure.
    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        first_error([
            leave_screen(self.terminal.backend_mut()),
            terminal::disable_raw_mode(),
            self.terminal.show_cursor(),
        ])
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        cursor::Hide
    )
}

fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        cursor::Show
    )
}

fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}

fn run(terminal: &mut DeskTerminal, shell: &mut DesktopShell) -> io::Result<()> {
    loop {
        terminal.draw(|frame| shell.render(frame))?;
        if !event::poll(FRAME_BUDGET)? {
            continue;
        }
        if shell.handle_event(&event::read()?) == ShellAction::Quit {
            tracing::debug!("quit requested");
            return Ok(());
        }
    }
}
