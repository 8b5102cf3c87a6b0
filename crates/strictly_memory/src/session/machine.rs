//! Game session engine.
//!
//! One [`GameSession`] owns the board of the current game plus everything
//! that outlives a single game (rules, aggregates, scheduler, sound, RNG).
//! Starting or replaying deals a new board and bumps the game generation so
//! a flip-back scheduled by the previous game can never touch the new one.

use super::phase::{Outcome, Phase, PlayerId, Scores, TurnNote};
use super::transition::{Effect, IgnoreReason, Transition};
use crate::board::{Board, PairCount, build_board};
use crate::rng::GameRng;
use crate::rules::RulesConfig;
use crate::scheduler::{DeferredTask, ManualScheduler, Scheduler, TaskHandle};
use crate::sound::SoundEffects;
use crate::store::Aggregates;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Mutable state of the game in progress and its collaborators.
pub struct GameSession<S> {
    pairs: PairCount,
    two_player: bool,
    rules: RulesConfig,
    board: Board,
    first: Option<usize>,
    second: Option<usize>,
    locked: bool,
    moves: u32,
    matched_pairs: u32,
    current_player: PlayerId,
    scores: Scores,
    turn_note: Option<TurnNote>,
    outcome: Option<Outcome>,
    generation: u64,
    pending_task: Option<TaskHandle>,
    aggregates: Aggregates,
    scheduler: S,
    sound: Box<dyn SoundEffects>,
    rng: GameRng,
}

impl<S> std::fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("pairs", &self.pairs)
            .field("two_player", &self.two_player)
            .field("phase", &self.phase())
            .field("moves", &self.moves)
            .field("matched_pairs", &self.matched_pairs)
            .field("current_player", &self.current_player)
            .field("scores", &self.scores)
            .field("generation", &self.generation)
            .field("aggregates", &self.aggregates)
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler> GameSession<S> {
    /// Creates a session and deals its first board.
    #[instrument(skip(rules, aggregates, scheduler, sound, rng))]
    pub fn new(
        pairs: PairCount,
        two_player: bool,
        rules: RulesConfig,
        aggregates: Aggregates,
        scheduler: S,
        sound: Box<dyn SoundEffects>,
        rng: GameRng,
    ) -> Self {
        let mut session = Self {
            pairs,
            two_player,
            rules,
            board: Board::default(),
            first: None,
            second: None,
            locked: false,
            moves: 0,
            matched_pairs: 0,
            current_player: PlayerId::One,
            scores: Scores::default(),
            turn_note: None,
            outcome: None,
            generation: 0,
            pending_task: None,
            aggregates,
            scheduler,
            sound,
            rng,
        };
        session.deal(pairs);
        session
    }

    /// Starts a new game with the given size and mode.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, pairs: PairCount, two_player: bool) {
        info!("Starting new game");
        self.two_player = two_player;
        self.current_player = PlayerId::One;
        self.scores = Scores::default();
        self.deal(pairs);
    }

    /// Deals a fresh board with the current size and mode.
    #[instrument(skip(self), fields(pairs = %self.pairs))]
    pub fn replay(&mut self) {
        info!("Replaying");
        self.current_player = PlayerId::One;
        self.scores = Scores::default();
        self.deal(self.pairs);
    }

    /// Flips the card at `position`.
    ///
    /// Selections while locked, on face-up, matched or disabled cards, or
    /// after the game ended are ignored.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn select_card(&mut self, position: usize) -> Transition {
        let Some(slot) = self.board.get(position) else {
            return self.ignore(IgnoreReason::NoSuchSlot(position));
        };
        let reason = if self.locked {
            Some(IgnoreReason::Locked)
        } else if *slot.matched() {
            Some(IgnoreReason::Matched)
        } else if *slot.face_up() {
            Some(IgnoreReason::FaceUp)
        } else if *slot.disabled() {
            Some(IgnoreReason::Disabled)
        } else if self.outcome.is_some() {
            Some(IgnoreReason::GameOver)
        } else {
            None
        };
        if let Some(reason) = reason {
            return self.ignore(reason);
        }

        self.flip_up(position);

        let Some(first) = self.first else {
            self.first = Some(position);
            debug!(position, "First card revealed");
            return Transition::Applied(Effect::FirstRevealed { position });
        };

        self.second = Some(position);
        self.locked = true;
        self.moves += 1;
        debug!(first, second = position, moves = self.moves, "Second card revealed");
        self.evaluate(first, position)
    }

    /// Runs a task previously handed to the scheduler.
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn fire(&mut self, task: DeferredTask) -> Transition {
        match task {
            DeferredTask::ResolveMismatch { generation } => self.resolve_mismatch(generation),
        }
    }

    /// Flips the sound preference and persists it. Returns the new value.
    #[instrument(skip(self))]
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.aggregates.sound_enabled();
        self.aggregates.set_sound_enabled(enabled);
        info!(enabled, "Sound toggled");
        enabled
    }

    fn deal(&mut self, pairs: PairCount) {
        if let Some(handle) = self.pending_task.take() {
            debug!(?handle, "Cancelling outstanding flip-back");
            self.scheduler.cancel(handle);
        }
        self.generation += 1;
        self.pairs = pairs;
        self.board = build_board(pairs, &mut self.rng);
        self.first = None;
        self.second = None;
        self.locked = false;
        self.moves = 0;
        self.matched_pairs = 0;
        self.outcome = None;
        if self.two_player {
            self.scores = Scores::default();
            self.current_player = PlayerId::One;
            self.turn_note = Some(TurnNote::Turn(PlayerId::One));
        } else {
            self.turn_note = None;
        }
        info!(
            pairs = %pairs,
            two_player = self.two_player,
            generation = self.generation,
            "Board dealt"
        );
    }

    fn flip_up(&mut self, position: usize) {
        if let Some(slot) = self.board.get_mut(position) {
            slot.reveal();
        }
        if self.aggregates.sound_enabled() {
            self.sound.play_flip();
        }
    }

    fn evaluate(&mut self, first: usize, second: usize) -> Transition {
        let same = match (self.board.get(first), self.board.get(second)) {
            (Some(a), Some(b)) => a.identity() == b.identity(),
            _ => false,
        };

        if !same {
            let task = DeferredTask::ResolveMismatch {
                generation: self.generation,
            };
            let handle = self
                .scheduler
                .schedule_after(self.rules.mismatch_delay(), task);
            self.pending_task = Some(handle);
            debug!(first, second, ?handle, "Mismatch, flip-back scheduled");
            return Transition::Applied(Effect::MismatchPending { first, second });
        }

        for position in [first, second] {
            if let Some(slot) = self.board.get_mut(position) {
                slot.mark_matched();
            }
        }
        if self.two_player {
            self.scores.increment(self.current_player);
            self.turn_note = Some(TurnNote::FoundPair(self.current_player));
        }
        self.matched_pairs += 1;
        self.first = None;
        self.second = None;
        self.locked = false;

        let outcome = (self.matched_pairs == u32::from(self.pairs.get())).then(|| {
            let outcome = Outcome::for_win(self.two_player, self.scores);
            self.outcome = Some(outcome);
            self.aggregates.record_win();
            info!(%outcome, moves = self.moves, "Game won");
            outcome
        });

        Transition::Applied(Effect::Matched {
            first,
            second,
            outcome,
        })
    }

    fn resolve_mismatch(&mut self, generation: u64) -> Transition {
        if generation != self.generation {
            return self.ignore(IgnoreReason::StaleTask);
        }
        let (Some(first), Some(second)) = (self.first, self.second) else {
            return self.ignore(IgnoreReason::NothingPending);
        };

        for position in [first, second] {
            if let Some(slot) = self.board.get_mut(position) {
                slot.conceal();
            }
        }
        self.first = None;
        self.second = None;
        self.locked = false;
        self.pending_task = None;

        if self.two_player {
            self.current_player = self.current_player.opponent();
            self.turn_note = Some(TurnNote::Turn(self.current_player));
        }

        let lost = self.moves >= self.pairs.move_limit(self.rules.move_limit_factor);
        if lost {
            self.board.disable_all();
            self.outcome = Some(Outcome::Loss);
            self.aggregates.record_loss();
            info!(moves = self.moves, "Game lost");
        }

        Transition::Applied(Effect::FlippedBack {
            first,
            second,
            lost,
        })
    }

    fn ignore(&self, reason: IgnoreReason) -> Transition {
        debug!(%reason, "Event ignored");
        Transition::Ignored(reason)
    }
}

impl<S> GameSession<S> {
    /// Current session phase.
    pub fn phase(&self) -> Phase {
        match self.outcome {
            Some(Outcome::Loss) => Phase::Lost,
            Some(outcome) => Phase::Won(outcome),
            None if self.locked => Phase::Resolving,
            None if self.first.is_some() => Phase::OneSelected,
            None => Phase::Idle,
        }
    }

    /// Pairs in the current game.
    pub fn pairs(&self) -> PairCount {
        self.pairs
    }

    /// Whether two players alternate turns.
    pub fn two_player(&self) -> bool {
        self.two_player
    }

    /// Game rules.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Cards of the current game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Positions of the pending face-up cards.
    pub fn selected(&self) -> (Option<usize>, Option<usize>) {
        (self.first, self.second)
    }

    /// Whether new selections are refused.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Completed two-card selections this game.
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// Pairs found this game.
    pub fn matched_count(&self) -> u32 {
        self.matched_pairs
    }

    /// Moves left before the game is lost.
    pub fn moves_remaining(&self) -> u32 {
        self.pairs
            .move_limit(self.rules.move_limit_factor)
            .saturating_sub(self.moves)
    }

    /// Player whose turn it is. Always player 1 in single-player mode.
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Pairs found per player.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Turn-owner text, two-player mode only.
    pub fn turn_note(&self) -> Option<TurnNote> {
        self.turn_note
    }

    /// How the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// End-of-game message, if the game has ended.
    pub fn message(&self) -> Option<String> {
        self.outcome.map(|outcome| outcome.to_string())
    }

    /// Counter of boards dealt by this session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether flip sounds play.
    pub fn sound_enabled(&self) -> bool {
        self.aggregates.sound_enabled()
    }

    /// Cross-game counters.
    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    /// The injected scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The injected scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl GameSession<ManualScheduler> {
    /// Advances the fake clock and fires every task that came due.
    pub fn advance(&mut self, by: Duration) -> Vec<Transition> {
        let due = self.scheduler.advance(by);
        due.into_iter().map(|task| self.fire(task)).collect()
    }

    /// Advances the fake clock past the mismatch delay.
    pub fn settle(&mut self) -> Vec<Transition> {
        self.advance(self.rules.mismatch_delay())
    }
}
