//! Veneer CLI - binary entry point and terminal session management.
//!
//! The binary bridges `veneer_engine` (application state) and `veneer_tui`
//! (rendering) with RAII-based terminal management and guaranteed cleanup.
//!
//! # Event Loop
//!
//! The restore sequence runs to completion before the first frame, so the
//! app can land directly on the analyze or results page. After that the loop
//! is strictly: draw one frame, wait for one input event, apply it. Network
//! operations are awaited inline from the event handlers - the only
//! suspension points are user input and network completion.

mod input;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::{Backend, CrosstermBackend, Terminal};
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use veneer_engine::App;

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(out);
        let terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = stdout();
                let _ = execute!(out, LeaveAlternateScreen, DisableMouseCapture);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("veneer"))
        .unwrap_or_else(|| PathBuf::from(".veneer"))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let dir = log_dir();
    if fs::create_dir_all(&dir).is_ok()
        && let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("veneer.log"))
    {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();
        tracing::info!(path = %dir.join("veneer.log").display(), "Logging initialized");
        return;
    }

    // If we can't open a log file, prefer "no logs" over corrupting the TUI
    // by writing to stdout/stderr.
    tracing_subscriber::registry().with(env_filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut app = App::from_environment();
    // Restore must finish before the first frame: the app may land directly
    // on the analyze or results page.
    app.initialize().await;

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| veneer_tui::draw(frame, app))?;

        if input::handle_events(app).await? {
            return Ok(());
        }
    }
}
