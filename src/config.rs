//! Application configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_memory::{PairCount, RulesConfig};
use tracing::{debug, info, instrument};

/// Configuration for the terminal game.
///
/// Every field has a default, so a missing file or a partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct AppConfig {
    /// Pair count of the first game.
    default_pairs: PairCount,

    /// Pair counts the size selector cycles through.
    pair_presets: Vec<PairCount>,

    /// Whether the first game is two-player.
    two_player: bool,

    /// Mismatch delay and move-limit rules.
    rules: RulesConfig,

    /// JSON file holding preferences that outlive a play session.
    store_path: PathBuf,

    /// File the TUI writes its log to.
    log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_pairs: PairCount::default(),
            pair_presets: PairCount::presets(),
            two_player: false,
            rules: RulesConfig::default(),
            store_path: PathBuf::from("strictly_match.json"),
            log_file: PathBuf::from("strictly_match.log"),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(pairs = %config.default_pairs, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_presets.is_empty() {
            return Err(ConfigError::new("pair_presets must not be empty".to_string()));
        }
        if self.rules.move_limit_factor == 0 {
            return Err(ConfigError::new(
                "rules.move_limit_factor must be positive".to_string(),
            ));
        }
        let largest = self
            .pair_presets
            .iter()
            .copied()
            .chain(std::iter::once(self.default_pairs))
            .max()
            .unwrap_or(self.default_pairs);
        if u32::from(largest.get())
            .checked_mul(self.rules.move_limit_factor)
            .is_none()
        {
            return Err(ConfigError::new(format!(
                "rules.move_limit_factor {} overflows the move limit for {} pairs",
                self.rules.move_limit_factor, largest
            )));
        }
        Ok(())
    }

    /// The preset after `current`, wrapping around.
    ///
    /// A count that is not a preset moves to the first preset above it.
    pub fn next_preset(&self, current: PairCount) -> PairCount {
        let mut sorted = self.pair_presets.clone();
        sorted.sort_unstable();
        sorted
            .iter()
            .copied()
            .find(|&p| p > current)
            .or_else(|| sorted.first().copied())
            .unwrap_or(current)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
