//! Persisted aggregates: win/loss counters and the sound preference.
//!
//! Two key/value scopes back the aggregates. The session scope lives as long
//! as the surrounding play session and holds the counters; the durable scope
//! outlives it and holds the sound flag. Reads never fail: absent or
//! unparseable values fall back to zero or "enabled".

use derive_more::{Display, Error};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Keys used in the two stores.
pub mod keys {
    /// Session wins (session scope).
    pub const WINS: &str = "mc_wins";
    /// Session losses (session scope).
    pub const LOSSES: &str = "mc_losses";
    /// Session games played (session scope).
    pub const GAMES_PLAYED: &str = "mc_games";
    /// Sound preference (durable scope).
    pub const SOUND_ENABLED: &str = "mc_soundEnabled";
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Small string key/value storage.
pub trait KeyValueStore {
    /// Reads a value, `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium rejects the write.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store. Lives exactly as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Cross-game counters and preferences over a session store and a durable store.
pub struct Aggregates {
    session: Box<dyn KeyValueStore>,
    durable: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Aggregates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregates")
            .field("wins", &self.wins())
            .field("losses", &self.losses())
            .field("games_played", &self.games_played())
            .field("sound_enabled", &self.sound_enabled())
            .finish()
    }
}

impl Aggregates {
    /// Creates aggregates over a session-scoped and a durable store.
    pub fn new(session: Box<dyn KeyValueStore>, durable: Box<dyn KeyValueStore>) -> Self {
        Self { session, durable }
    }

    /// Wins recorded this session.
    pub fn wins(&self) -> u32 {
        read_count(self.session.as_ref(), keys::WINS)
    }

    /// Losses recorded this session.
    pub fn losses(&self) -> u32 {
        read_count(self.session.as_ref(), keys::LOSSES)
    }

    /// Games finished this session.
    pub fn games_played(&self) -> u32 {
        read_count(self.session.as_ref(), keys::GAMES_PLAYED)
    }

    /// Whether flip sounds play. Enabled unless explicitly stored as `false`.
    pub fn sound_enabled(&self) -> bool {
        self.durable.get(keys::SOUND_ENABLED).as_deref() != Some("false")
    }

    /// Records a won game.
    #[instrument(skip(self))]
    pub fn record_win(&mut self) {
        let wins = self.wins().saturating_add(1);
        self.write_session(keys::WINS, wins);
        self.bump_games_played();
        debug!(wins, "Win recorded");
    }

    /// Records a lost game.
    #[instrument(skip(self))]
    pub fn record_loss(&mut self) {
        let losses = self.losses().saturating_add(1);
        self.write_session(keys::LOSSES, losses);
        self.bump_games_played();
        debug!(losses, "Loss recorded");
    }

    /// Persists the sound preference.
    #[instrument(skip(self))]
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        if let Err(e) = self.durable.set(keys::SOUND_ENABLED, enabled.to_string()) {
            warn!(error = %e, "Failed to persist sound preference");
        }
    }

    fn bump_games_played(&mut self) {
        let games = self.games_played().saturating_add(1);
        self.write_session(keys::GAMES_PLAYED, games);
    }

    fn write_session(&mut self, key: &str, value: u32) {
        if let Err(e) = self.session.set(key, value.to_string()) {
            warn!(key, error = %e, "Failed to persist session counter");
        }
    }
}

fn read_count(store: &dyn KeyValueStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}
