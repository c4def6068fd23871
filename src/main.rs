use std::path::PathBuf;

use clap::Parser;

use trivia_board::cli::Cli;
use trivia_board::config::{self, Settings};
use trivia_board::state::AppState;
use trivia_board::{logging, report, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let settings = Settings::resolve(&cli)?;

    let log_path = cli
        .log_file
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(config::default_log_path);
    if let Err(e) = logging::init_logging(&log_path) {
        eprintln!("Warning: {}", e);
    }

    tracing::info!(
        "Using {} ({} categories x {} clues, pool {})",
        settings.api_url,
        settings.categories,
        settings.clues_per_category,
        settings.pool_size
    );

    // Handle --print
    if cli.print {
        print!("{}", report::load_board_text(&settings)?);
        return Ok(());
    }

    tui::run_tui(AppState::new(settings))
}
