//! Cupcake - terminal cupcake ordering
//!
//! Walks the user through choosing a quantity, flavor and pickup date,
//! then hands the finished order to the clipboard or a file.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use cupcake::application::{App, AppMode};
use cupcake::domain::SystemClock;
use cupcake::infrastructure::{
    logging, ClipboardShare, ConfigRepository, FileShare, ShareTarget, ShopConfig,
};
use cupcake::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "cupcake", version, about = "Order cupcakes from the terminal")]
struct Cli {
    /// JSON file with the shop's quantities, flavors, prices and pickup days
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write diagnostic logs here (overrides `log_file` in the config)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Append sent orders to this file instead of copying them to the clipboard
    #[arg(long, value_name = "PATH")]
    share_file: Option<PathBuf>,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Entry point for the cupcake ordering application.
///
/// Loads configuration, sets up logging and the terminal, and runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is unusable, the log file cannot
/// be opened, or the terminal fails during setup or runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_default_config {
        println!("{}", ConfigRepository::to_json(&ShopConfig::default())?);
        return Ok(());
    }

    let config = match cli.config {
        Some(ref path) => ConfigRepository::load(path)?,
        None => ShopConfig::default(),
    };
    if let Some(log_file) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging::init(log_file)?;
    }

    let share_target: Box<dyn ShareTarget> = match cli.share_file {
        Some(path) => Box::new(FileShare::new(path)),
        None => Box::new(ClipboardShare::default()),
    };
    let mut app = App::new(config.catalog, Box::new(SystemClock), share_target);
    info!(config = ?cli.config, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Redraws after every key press. Returns when the user presses 'q'
/// outside the help popup.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => {
                        info!("quitting");
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
