//! Command-line interface for strictly_match.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Strictly Match - memory card game for the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_match")]
#[command(about = "Flip cards two at a time and find every pair", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "strictly_match.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Number of pairs on the board
        #[arg(short, long)]
        pairs: Option<u16>,

        /// Two players alternate turns
        #[arg(short, long)]
        two_player: bool,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or set the saved sound preference
    Sound {
        /// New setting; prints the current one when omitted
        state: Option<SoundState>,
    },
}

/// Sound preference on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SoundState {
    /// Flip sounds play.
    On,
    /// Flip sounds are muted.
    Off,
}
