//! Application state and key handling.

use crossterm::event::KeyCode;
use strictly_memory::{DeferredTask, Effect, GameSession, PairCount, Scheduler, Transition};
use tracing::{debug, instrument};

use super::input::{grid_columns, move_cursor};
use crate::AppConfig;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Keep running.
    Continue,
    /// Leave the game.
    Quit,
}

/// Main application state.
///
/// Wraps a [`GameSession`] with the cursor and the settings the next
/// `start` will use.
#[derive(Debug)]
pub struct App<S> {
    session: GameSession<S>,
    config: AppConfig,
    cursor: usize,
    next_pairs: PairCount,
    next_two_player: bool,
    status_message: String,
}

impl<S: Scheduler> App<S> {
    /// Creates a new application around a session.
    pub fn new(session: GameSession<S>, config: AppConfig) -> Self {
        let next_pairs = session.pairs();
        let next_two_player = session.two_player();
        Self {
            session,
            config,
            cursor: 0,
            next_pairs,
            next_two_player,
            status_message: "Find all the pairs!".to_string(),
        }
    }

    /// The game session.
    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// The game session, mutably.
    pub fn session_mut(&mut self) -> &mut GameSession<S> {
        &mut self.session
    }

    /// Card under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Columns of the current board.
    pub fn columns(&self) -> usize {
        grid_columns(self.session.board().len())
    }

    /// Pair count the next `start` will use.
    pub fn next_pairs(&self) -> PairCount {
        self.next_pairs
    }

    /// Mode the next `start` will use.
    pub fn next_two_player(&self) -> bool {
        self.next_two_player
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Handles a key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = self.session.select_card(self.cursor);
                self.describe(result);
            }
            KeyCode::Char('s') => self.start(),
            KeyCode::Char('r') => self.replay(),
            KeyCode::Char('m') => {
                let enabled = self.session.toggle_sound();
                self.status_message = if enabled { "Sound on" } else { "Sound off" }.to_string();
            }
            KeyCode::Char('p') => {
                self.next_pairs = self.config.next_preset(self.next_pairs);
                self.status_message = format!(
                    "Next game: {} pairs. Press 's' to start.",
                    self.next_pairs
                );
            }
            KeyCode::Char('t') => {
                self.next_two_player = !self.next_two_player;
                self.status_message = format!(
                    "Next game: {}. Press 's' to start.",
                    if self.next_two_player { "two players" } else { "one player" }
                );
            }
            other => {
                self.cursor = move_cursor(
                    self.cursor,
                    other,
                    self.columns(),
                    self.session.board().len(),
                );
            }
        }
        AppAction::Continue
    }

    /// Feeds a fired timer to the session.
    #[instrument(skip(self))]
    pub fn on_task(&mut self, task: DeferredTask) {
        let result = self.session.fire(task);
        self.describe(result);
    }

    fn start(&mut self) {
        self.session.start_game(self.next_pairs, self.next_two_player);
        self.cursor = 0;
        self.status_message = format!("New game: {} pairs.", self.next_pairs);
    }

    fn replay(&mut self) {
        self.session.replay();
        self.cursor = 0;
        self.status_message = "Board reshuffled.".to_string();
    }

    fn describe(&mut self, result: Transition) {
        debug!(?result, "Session transition");
        self.status_message = match result {
            Transition::Ignored(reason) => reason.to_string(),
            Transition::Applied(Effect::FirstRevealed { .. }) => "Pick a second card.".to_string(),
            Transition::Applied(Effect::Matched { outcome: Some(outcome), .. }) => {
                format!("{} Press 'r' to replay or 's' for a new game.", outcome)
            }
            Transition::Applied(Effect::Matched { .. }) => "It's a match!".to_string(),
            Transition::Applied(Effect::MismatchPending { .. }) => "No match.".to_string(),
            Transition::Applied(Effect::FlippedBack { lost: true, .. }) => {
                "Out of moves. Press 'r' to replay.".to_string()
            }
            Transition::Applied(Effect::FlippedBack { .. }) => "Try again.".to_string(),
        };
    }
}
