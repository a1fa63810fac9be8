use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::config::{Cli, Settings};
use grid_snake::game::SnakeGame;
use grid_snake::store::HighScoreFile;
use grid_snake::term::TermManager;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let settings = Settings::from(&cli);
    let store = HighScoreFile::new(cli.high_score_file.clone());
    let high_score = store.load()?;
    let term = TermManager::new(settings.grid)?;

    let mut game = SnakeGame::new(settings, term, store, high_score);
    game.run()
}

// Logs go to a file: anything printed to the terminal would land on the board.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
