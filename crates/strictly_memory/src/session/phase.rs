//! Session phases, players, and end-of-game outcomes.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A player in two-player mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, strum::Display,
)]
pub enum PlayerId {
    /// Player 1, who always starts.
    #[default]
    #[strum(serialize = "1")]
    One,
    /// Player 2.
    #[strum(serialize = "2")]
    Two,
}

impl PlayerId {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Pairs found per player in two-player mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    one: u32,
    two: u32,
}

impl Scores {
    /// Creates scores from explicit values.
    pub fn new(one: u32, two: u32) -> Self {
        Self { one, two }
    }

    /// Pairs found by `player`.
    pub fn get(&self, player: PlayerId) -> u32 {
        match player {
            PlayerId::One => self.one,
            PlayerId::Two => self.two,
        }
    }

    pub(crate) fn increment(&mut self, player: PlayerId) {
        match player {
            PlayerId::One => self.one += 1,
            PlayerId::Two => self.two += 1,
        }
    }

    /// The player with more pairs, `None` on a tie.
    pub fn leader(&self) -> Option<PlayerId> {
        PlayerId::iter().find(|&p| self.get(p) > self.get(p.opponent()))
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.one, self.two)
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Single-player game cleared.
    SoloWin,
    /// Two-player game cleared with equal scores.
    Tie(Scores),
    /// Two-player game cleared with a leader.
    Winner {
        /// The player with more pairs.
        player: PlayerId,
        /// Final scores.
        scores: Scores,
    },
    /// The move limit ran out.
    Loss,
}

impl Outcome {
    /// Outcome of a cleared board.
    pub fn for_win(two_player: bool, scores: Scores) -> Self {
        if !two_player {
            return Outcome::SoloWin;
        }
        match scores.leader() {
            Some(player) => Outcome::Winner { player, scores },
            None => Outcome::Tie(scores),
        }
    }

    /// Returns true if the board was cleared.
    pub fn is_win(&self) -> bool {
        !matches!(self, Outcome::Loss)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::SoloWin => write!(f, "You won! 🎉"),
            Outcome::Tie(scores) => write!(f, "Tie! {}", scores),
            Outcome::Winner { player, scores } => write!(f, "Player {} wins {} 🎉", player, scores),
            Outcome::Loss => write!(f, "You lost — try again!"),
        }
    }
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No card pending.
    Idle,
    /// One card face up, waiting for the second.
    OneSelected,
    /// Two cards face up; a mismatch is waiting to flip back.
    Resolving,
    /// Every pair found.
    Won(Outcome),
    /// Move limit reached.
    Lost,
}

impl Phase {
    /// Returns true for `Won` and `Lost`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won(_) | Phase::Lost)
    }
}

/// Turn-owner text shown in two-player mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnNote {
    /// It is this player's turn.
    Turn(PlayerId),
    /// This player just found a pair and keeps the turn.
    FoundPair(PlayerId),
}

impl std::fmt::Display for TurnNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnNote::Turn(player) => write!(f, "Player {}'s turn", player),
            TurnNote::FoundPair(player) => write!(f, "Player {} found a pair!", player),
        }
    }
}
