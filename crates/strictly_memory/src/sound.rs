//! Flip sound capability.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Plays the card-flip sound effect.
///
/// Fire-and-forget: playback failures are the implementation's concern and
/// never reach the game. The session only calls this while sound is enabled.
pub trait SoundEffects {
    /// Plays the flip sound once.
    fn play_flip(&mut self);
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl SoundEffects for Silent {
    fn play_flip(&mut self) {}
}

/// Counts flip sounds instead of playing them.
///
/// Clones share the counter, so a test can keep one clone and hand the other
/// to a session.
#[derive(Debug, Clone, Default)]
pub struct CountingSound {
    plays: Arc<AtomicUsize>,
}

impl CountingSound {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of flips played so far.
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl SoundEffects for CountingSound {
    fn play_flip(&mut self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}
