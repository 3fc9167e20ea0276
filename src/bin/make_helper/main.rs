use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io;
use std::path::Path;
use std::process;
use std::time::Duration;

mod app;
mod runner;
mod ui;

use app::App;
use runner::{MakeRunner, Runner};

#[derive(Parser)]
#[command(name = "make-helper")]
#[command(about = "Pick a Makefile target from a list and run it")]
struct Args {
    /// Path to the Makefile
    #[arg(short, long, default_value = "Makefile")]
    file: String,

    /// Command used to run the selected target
    #[arg(long, default_value = "make")]
    make: String,
}

#[derive(Debug)]
enum StartupError {
    /// The makefile does not exist
    Missing(String),
    /// The makefile could not be read
    Parse(make_helper::Error),
    /// The makefile has no rules to pick from
    NoTargets,
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self {
            StartupError::Missing(path) => write!(f, "Can't find {} here", path),
            StartupError::Parse(e) => write!(f, "Can't parse Makefile due to error: {}", e),
            StartupError::NoTargets => write!(f, "Makefile doesn't contain any targets"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<make_helper::Error> for StartupError {
    fn from(e: make_helper::Error) -> Self {
        StartupError::Parse(e)
    }
}

/// Parse the makefile and return its targets, refusing files without any.
fn load_targets(path: &str) -> Result<Vec<String>, StartupError> {
    // Only a definite "not found" counts as missing; other failures are left
    // for the parser to report.
    if let Ok(false) = Path::new(path).try_exists() {
        return Err(StartupError::Missing(path.to_string()));
    }

    let parsed = make_helper::parse(path)?;
    if parsed.rules().is_empty() {
        return Err(StartupError::NoTargets);
    }
    Ok(parsed.targets().map(str::to_string).collect())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let targets = match load_targets(&args.file) {
        Ok(targets) => targets,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    log::debug!("{} target(s) in {}", targets.len(), args.file);

    let mut app = App::new(targets, MakeRunner::new(&args.make));
    if let Err(e) = run(&mut app) {
        eprintln!("Exception during run: {}", e);
        process::exit(1);
    }
}

fn run<R: Runner>(app: &mut App<R>) -> io::Result<()> {
    with_terminal_mode(enable_raw_mode, disable_raw_mode, || {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = run_app(&mut terminal, app);

        terminal.clear()?;
        terminal.show_cursor()?;
        result
    })
}

/// Run `body` between `enter` and `leave`; `leave` runs whenever `enter`
/// succeeded, whatever `body` returns.
fn with_terminal_mode<T>(
    enter: impl FnOnce() -> io::Result<()>,
    leave: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce() -> io::Result<T>,
) -> io::Result<T> {
    enter()?;
    let result = body();
    leave()?;
    result
}

fn run_app<B: Backend, R: Runner>(terminal: &mut Terminal<B>, app: &mut App<R>) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
