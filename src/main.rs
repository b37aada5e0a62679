//! Tagfield - edit a form of tag fields in the terminal.
//!
//! Each configured field is shown as a tag editor. Ctrl+S prints the
//! url-encoded form data to stdout and exits.

use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::cursor::Show;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{error, info, warn};

use tagfield::app::App;
use tagfield::config::{Config, FieldSpec};
use tagfield::editor::EditorConfig;
use tagfield::error::{AppError, Result};
use tagfield::events::EventHandler;
use tagfield::logging;

#[derive(Parser, Debug)]
#[command(name = "tagfield")]
#[command(version, about = "Chip-based tag editor for form fields", long_about = None)]
struct Cli {
    /// Path to a configuration file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep every editor in the active state
    #[arg(long)]
    debug: bool,

    /// Trim whitespace from tags before adding them
    #[arg(long)]
    trim: bool,

    /// Field name to edit; repeat for several fields (replaces configured fields)
    #[arg(short, long = "field")]
    fields: Vec<String>,

    /// Editor options as JSON, e.g. '{"width": 300, "maxHeight": "50%"}'
    #[arg(long)]
    options: Option<String>,

    /// Print the form markup after setup and exit
    #[arg(long)]
    print_html: bool,
}

/// Puts the terminal into TUI mode and restores it when dropped, including
/// on early returns and panics.
struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    fn enter(mouse: bool) -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { mouse };
        execute!(stdout(), EnterAlternateScreen, EnableFocusChange)?;
        if mouse {
            execute!(stdout(), EnableMouseCapture)?;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_screen(&mut stdout(), self.mouse);
        let _ = disable_raw_mode();
    }
}

/// Undo the screen modes set by [`TerminalGuard::enter`].
fn restore_screen(out: &mut impl Write, mouse: bool) -> io::Result<()> {
    if mouse {
        execute!(out, DisableMouseCapture)?;
    }
    execute!(out, DisableFocusChange, LeaveAlternateScreen, Show)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not load config, using defaults");
            Config::default()
        }),
    };

    if let Some(json) = &cli.options {
        let options = EditorConfig::from_json(json)?;
        config.editor.merge(&options);
    }
    config.editor.debug |= cli.debug;
    config.editor.trim_input |= cli.trim;
    if !cli.fields.is_empty() {
        config.fields = cli.fields.iter().map(FieldSpec::new).collect();
    }

    config.validate()?;
    Ok(config)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate_ms: u64,
) -> io::Result<()> {
    let events = EventHandler::with_tick_rate(tick_rate_ms);
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let mut app = App::new(&config)?;

    if cli.print_html {
        println!("{}", app.markup());
        return Ok(());
    }

    {
        let _guard = TerminalGuard::enter(config.settings.mouse)
            .map_err(|e| AppError::terminal(e.to_string()))?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))
            .map_err(|e| AppError::terminal(e.to_string()))?;
        event_loop(&mut terminal, &mut app, config.settings.tick_rate_ms)?;
    }

    if let Some(data) = app.submission() {
        info!("Printing submission");
        println!("{data}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.print_html {
        if let Err(e) = logging::init() {
            eprintln!("Warning: could not initialize logging: {e}");
        }
    }

    let result = run(&cli);
    logging::shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, critical = e.is_critical(), "Tagfield failed");
            eprintln!("Error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("Hint: {action}");
            }
            if let Some(dir) = logging::log_directory() {
                eprintln!("Logs: {}", dir.display());
            }
            ExitCode::from(e.exit_code())
        }
    }
}
