//! Tunable rules of a memory game.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and loss-limit rules shared by every game in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// How long a mismatched pair stays face up, in milliseconds.
    pub mismatch_delay_ms: u64,
    /// The game is lost once `moves >= pairs * move_limit_factor`.
    pub move_limit_factor: u32,
}

impl RulesConfig {
    /// Mismatch flip-back delay.
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// Returns a copy with a different mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns a copy with a different move-limit factor.
    #[must_use]
    pub fn with_move_limit_factor(mut self, factor: u32) -> Self {
        self.move_limit_factor = factor;
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            mismatch_delay_ms: 700,
            move_limit_factor: 6,
        }
    }
}
