//! habitrack - Monthly Habit Tracker
//!
//! A terminal habit tracker: one list of habits per month, marked done as
//! you go, saved to a JSON file after every change.

use std::io;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use habitrack::application::{App, AppMode, Cli, Config};
use habitrack::domain::MonthKey;
use habitrack::infrastructure::{init_logging, FileRepository};
use habitrack::presentation::{render_ui, InputHandler};

/// Entry point for the habit tracker.
///
/// Parses flags, starts file logging, loads the habit file and runs the
/// terminal UI until the user quits.
///
/// # Errors
///
/// Returns an error if the habit file exists but cannot be read, or if
/// terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_cli(Cli::parse());

    let _logger = match config.log_dir.as_deref() {
        Some(log_dir) => match init_logging(&config.log_level, log_dir) {
            Ok(handle) => Some(handle),
            Err(err) => {
                eprintln!("habitrack: logging disabled: {err}");
                None
            }
        },
        None => None,
    };

    let store = FileRepository::load_store(&config.habits_file)?;
    let mut app = App::new(store, config.habits_file.clone(), MonthKey::current());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("event=app_exit status=error reason={}", err);
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
