//! Strictly Match - terminal memory game
//!
//! Deals a board of face-down cards and runs the match/mismatch loop.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, SoundState};
use strictly_match::{AppConfig, JsonFileStore, PlayOptions, run_tui};
use strictly_memory::{Aggregates, MemoryStore, PairCount};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?;

    match cli.command.unwrap_or(Command::Play {
        pairs: None,
        two_player: false,
        seed: None,
    }) {
        Command::Play {
            pairs,
            two_player,
            seed,
        } => run_play(config, pairs, two_player, seed).await,
        Command::Sound { state } => run_sound(&config, state),
    }
}

/// Run the game TUI, logging to the configured file.
async fn run_play(
    config: AppConfig,
    pairs: Option<u16>,
    two_player: bool,
    seed: Option<u64>,
) -> Result<()> {
    // Log to a file so the TUI keeps the terminal
    let log_file = std::fs::File::create(config.log_file())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    let pairs = pairs.map(PairCount::new).transpose()?;
    let options = PlayOptions {
        pairs,
        two_player,
        seed,
    };
    run_tui(config, options).await
}

/// Print or update the durable sound preference.
#[instrument(skip(config))]
fn run_sound(config: &AppConfig, state: Option<SoundState>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let durable = JsonFileStore::open(config.store_path());
    let mut aggregates = Aggregates::new(Box::new(MemoryStore::new()), Box::new(durable));

    if let Some(state) = state {
        aggregates.set_sound_enabled(state == SoundState::On);
        info!(%state, "Sound preference updated");
    }

    let current = if aggregates.sound_enabled() {
        SoundState::On
    } else {
        SoundState::Off
    };
    println!("Sound: {}", current);
    Ok(())
}
