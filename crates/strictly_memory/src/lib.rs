//! Strictly Memory - pure memory-matching game logic
//!
//! A board of face-down cards is dealt in pairs; players flip two at a time,
//! matching pairs stay revealed and mismatches flip back after a delay.
//!
//! # Architecture
//!
//! - **Board**: pair identities, card slots, and the shuffled deal
//! - **Session**: the game session state machine (selection, match
//!   evaluation, win/loss detection, two-player turns)
//! - **Store**: key/value capability backing the win/loss counters and the
//!   sound preference
//! - **Scheduler**: deferred-task capability for the mismatch flip-back
//! - **Sound**: fire-and-forget flip sound capability
//!
//! # Example
//!
//! ```
//! use strictly_memory::{
//!     Aggregates, GameRng, GameSession, ManualScheduler, MemoryStore, PairCount, RulesConfig,
//!     Silent,
//! };
//!
//! let aggregates = Aggregates::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()));
//! let mut session = GameSession::new(
//!     PairCount::new(6).unwrap(),
//!     false,
//!     RulesConfig::default(),
//!     aggregates,
//!     ManualScheduler::new(),
//!     Box::new(Silent),
//!     GameRng::new(7),
//! );
//! assert_eq!(session.board().len(), 12);
//! assert_eq!(session.move_count(), 0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod rng;
mod rules;
mod scheduler;
mod session;
mod sound;
mod store;

pub use board::{Board, CardSlot, Identity, PairCount, PairCountError, build_board, generate_identities};
pub use rng::GameRng;
pub use rules::RulesConfig;
pub use scheduler::{DeferredTask, ManualScheduler, Scheduler, TaskHandle};
pub use session::{
    Effect, GameSession, IgnoreReason, Outcome, Phase, PlayerId, Scores, Transition, TurnNote,
};
pub use sound::{CountingSound, Silent, SoundEffects};
pub use store::{Aggregates, KeyValueStore, MemoryStore, StoreError, keys};
