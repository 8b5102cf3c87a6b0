//! The game session state machine.

mod machine;
mod phase;
mod transition;

pub use machine::GameSession;
pub use phase::{Outcome, Phase, PlayerId, Scores, TurnNote};
pub use transition::{Effect, IgnoreReason, Transition};
