//! Results of feeding an event to the session.
//!
//! Invalid or out-of-window input is not an error. The session answers with
//! [`Transition::Ignored`] and leaves every field untouched.

use super::phase::Outcome;
use serde::{Deserialize, Serialize};

/// What an event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The event was dropped; nothing changed.
    Ignored(IgnoreReason),
    /// The event changed the session.
    Applied(Effect),
}

impl Transition {
    /// Returns true if the event changed the session.
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied(_))
    }
}

/// Why an event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoreReason {
    /// A two-card comparison is outstanding.
    #[display("Board is locked")]
    Locked,
    /// The card is already face up.
    #[display("Card is already face up")]
    FaceUp,
    /// The card's pair was already found.
    #[display("Card is already matched")]
    Matched,
    /// The card was disabled when the game was lost.
    #[display("Card is disabled")]
    Disabled,
    /// The game already ended.
    #[display("Game is over")]
    GameOver,
    /// No card at that position.
    #[display("No card at position {}", _0)]
    NoSuchSlot(usize),
    /// A deferred task from an earlier game.
    #[display("Task belongs to an earlier game")]
    StaleTask,
    /// A deferred task arrived with no comparison outstanding.
    #[display("No comparison pending")]
    NothingPending,
}

/// A change applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// First card of a move turned face up.
    FirstRevealed {
        /// Card position.
        position: usize,
    },
    /// Second card matched the first.
    Matched {
        /// First card position.
        first: usize,
        /// Second card position.
        second: usize,
        /// Set when this pair cleared the board.
        outcome: Option<Outcome>,
    },
    /// Second card did not match; both stay up until the flip-back fires.
    MismatchPending {
        /// First card position.
        first: usize,
        /// Second card position.
        second: usize,
    },
    /// A mismatched pair flipped back face down.
    FlippedBack {
        /// First card position.
        first: usize,
        /// Second card position.
        second: usize,
        /// Set when the move limit ran out.
        lost: bool,
    },
}
