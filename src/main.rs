//! jobform - Terminal Job Application Form
//!
//! Collects a job application in the terminal, validates it inline, and
//! shows a summary of what was submitted after a short simulated delay.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use jobform::application::{App, SystemClock};
use jobform::error::AppError;
use jobform::infrastructure::{telemetry, AppConfig, ConfigOverrides};
use jobform::presentation::{render_ui, InputHandler};

/// How long the loop waits for input when no timer is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "jobform", about = "Fill in and submit a job application from the terminal", version)]
struct Cli {
    /// Simulated processing time after a valid submit, in milliseconds
    #[arg(long)]
    submit_delay_ms: Option<u64>,
    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,
    /// Append logs to this file; logging is off when unset
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        Self {
            submit_delay_ms: cli.submit_delay_ms,
            log_level: cli.log_level,
            log_file: cli.log_file,
        }
    }
}

/// Entry point for the job application form.
///
/// Loads configuration, sets up logging and the terminal, and runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?.with_overrides(cli.into());
    telemetry::init(&config.telemetry)?;
    info!(delay_ms = config.submit_delay.as_millis() as u64, "starting jobform");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(SystemClock, config.submit_delay);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    info!("exiting jobform");
    Ok(())
}

/// Main application event loop.
///
/// Waits for key presses, waking early when the submit timer is due so
/// the summary appears on time.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = app.time_until_tick().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if InputHandler::is_quit(key.code, key.modifiers) {
                        return Ok(());
                    }
                    InputHandler::handle_key_event(app, key.code, key.modifiers);
                }
            }
        }

        app.tick();
    }
}
