//! Tabula - an interactive data table for the terminal.
//!
//! Generates a synthetic person directory and displays it in a themeable
//! table with column reordering, resizing, sorting, filtering, visibility
//! toggling, and pagination.

mod app;
mod config;
mod data;
mod error;
mod events;
mod logging;
mod table;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use app::App;
use config::Config;
use error::AppError;
use events::EventHandler;

/// Command line options. Each one overrides the corresponding config
/// setting for this run only.
#[derive(Debug, Parser)]
#[command(
    name = "tabula",
    version,
    about = "An interactive data table for the terminal"
)]
struct Cli {
    /// Number of synthetic records to generate
    #[arg(long)]
    rows: Option<usize>,

    /// Rows per table page
    #[arg(long)]
    page_size: Option<usize>,

    /// Seed for the record generator, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// UI theme (dark or light)
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init()?;

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::from(e);
            warn!("{}", err.user_message());
            Config::default()
        }
    };

    if let Some(rows) = cli.rows {
        config.settings.rows = rows;
    }
    if let Some(page_size) = cli.page_size {
        config.settings.page_size = page_size;
    }
    if let Some(theme) = cli.theme {
        config.settings.theme = theme;
    }
    ui::init_theme(&config.settings.theme);

    let records = match cli.seed {
        Some(seed) => data::make_data(config.settings.rows, &mut StdRng::seed_from_u64(seed)),
        None => data::make_data(config.settings.rows, &mut rand::rng()),
    };

    let app = App::new(config, records);
    let result = run(app);

    logging::shutdown();
    result
}

/// Set up the terminal, drive the event loop, and restore the terminal
/// even when the loop errors.
fn run(mut app: App) -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let handler = EventHandler::new();
    let result = event_loop(&mut terminal, &mut app, &handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Draw, wait for the next event, update. Repeats until the app asks to
/// quit.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    handler: &EventHandler,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = handler.next()?;
        app.update(event);
    }
    Ok(())
}
