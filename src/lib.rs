//! Strictly Match library - terminal front end for the memory game
//!
//! The game rules live in [`strictly_memory`]; this crate supplies the
//! production collaborators the session needs and a terminal UI around it.
//!
//! # Architecture
//!
//! - **Config**: TOML configuration with defaults for every field
//! - **Store**: JSON file backing for preferences that outlive a session
//! - **Timer**: tokio scheduler delivering the mismatch flip-back
//! - **Bell**: terminal bell as the flip sound
//! - **TUI**: ratatui board, cursor navigation, and key bindings
//!
//! # Example
//!
//! ```no_run
//! use strictly_match::{AppConfig, PlayOptions, run_tui};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load_or_default("strictly_match.toml")?;
//! run_tui(config, PlayOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bell;
mod config;
mod file_store;
mod timer;
mod tui;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Production collaborators
pub use bell::TerminalBell;
pub use file_store::JsonFileStore;
pub use timer::TokioScheduler;

// Crate-level exports - Terminal UI
pub use tui::{App, AppAction, PlayOptions, grid_columns, move_cursor, run_tui};
