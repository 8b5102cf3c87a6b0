//! Tests for the game session state machine.

use std::collections::HashMap;
use std::time::Duration;

use strictly_memory::{
    Aggregates, CountingSound, DeferredTask, Effect, GameRng, GameSession, IgnoreReason,
    ManualScheduler, MemoryStore, Outcome, PairCount, Phase, PlayerId, RulesConfig, Scores,
    Transition, TurnNote,
};

fn new_session(pairs: u16, two_player: bool) -> (GameSession<ManualScheduler>, CountingSound) {
    let sound = CountingSound::new();
    let aggregates = Aggregates::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()));
    let session = GameSession::new(
        PairCount::new(pairs).expect("positive"),
        two_player,
        RulesConfig::default(),
        aggregates,
        ManualScheduler::new(),
        Box::new(sound.clone()),
        GameRng::new(42),
    );
    (session, sound)
}

fn limited_session(pairs: u16, move_limit_factor: u32) -> GameSession<ManualScheduler> {
    let aggregates = Aggregates::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()));
    GameSession::new(
        PairCount::new(pairs).expect("positive"),
        false,
        RulesConfig::default().with_move_limit_factor(move_limit_factor),
        aggregates,
        ManualScheduler::new(),
        Box::new(CountingSound::new()),
        GameRng::new(42),
    )
}

/// Unmatched pairs on the board, as position pairs, in order of first appearance.
fn open_pairs(session: &GameSession<ManualScheduler>) -> Vec<[usize; 2]> {
    let mut seen: HashMap<u16, usize> = HashMap::new();
    let mut pairs = Vec::new();
    for slot in session.board().slots() {
        if *slot.matched() {
            continue;
        }
        let key = slot.identity().index();
        match seen.remove(&key) {
            Some(first) => pairs.push([first, *slot.position()]),
            None => {
                seen.insert(key, *slot.position());
            }
        }
    }
    pairs.sort();
    pairs
}

fn match_one(session: &mut GameSession<ManualScheduler>) -> Transition {
    let [a, b] = open_pairs(session)[0];
    assert!(session.select_card(a).is_applied());
    session.select_card(b)
}

fn mismatch_one(session: &mut GameSession<ManualScheduler>) -> Vec<Transition> {
    let open = open_pairs(session);
    let (a, b) = (open[0][0], open[1][0]);
    assert!(session.select_card(a).is_applied());
    assert_eq!(
        session.select_card(b),
        Transition::Applied(Effect::MismatchPending { first: a, second: b })
    );
    session.settle()
}

#[test]
fn test_first_selection_reveals_one_card() {
    let (mut session, sound) = new_session(4, false);
    let result = session.select_card(0);

    assert_eq!(result, Transition::Applied(Effect::FirstRevealed { position: 0 }));
    assert_eq!(session.phase(), Phase::OneSelected);
    assert!(*session.board().get(0).unwrap().face_up());
    assert_eq!(session.move_count(), 0);
    assert_eq!(sound.plays(), 1);
}

#[test]
fn test_move_counts_pairs_of_flips() {
    let (mut session, _) = new_session(4, false);
    mismatch_one(&mut session);
    assert_eq!(session.move_count(), 1);

    let open = open_pairs(&session);
    session.select_card(open[0][0]);
    assert_eq!(session.move_count(), 1);
    session.select_card(open[0][1]);
    assert_eq!(session.move_count(), 2);
}

#[test]
fn test_reselecting_face_up_card_is_ignored() {
    let (mut session, sound) = new_session(4, false);
    session.select_card(3);
    let before = session.board().clone();

    assert_eq!(session.select_card(3), Transition::Ignored(IgnoreReason::FaceUp));
    assert_eq!(session.board(), &before);
    assert_eq!(session.phase(), Phase::OneSelected);
    assert_eq!(sound.plays(), 1);
}

#[test]
fn test_selection_while_locked_is_ignored() {
    let (mut session, _) = new_session(4, false);
    let open = open_pairs(&session);
    session.select_card(open[0][0]);
    session.select_card(open[1][0]);
    assert_eq!(session.phase(), Phase::Resolving);
    assert!(session.is_locked());

    let before = session.board().clone();
    let result = session.select_card(open[2][0]);

    assert_eq!(result, Transition::Ignored(IgnoreReason::Locked));
    assert_eq!(session.board(), &before);
    assert_eq!(session.move_count(), 1);
    assert_eq!(session.matched_count(), 0);
}

#[test]
fn test_selecting_matched_card_is_ignored() {
    let (mut session, _) = new_session(4, false);
    let [a, _] = open_pairs(&session)[0];
    match_one(&mut session);

    assert_eq!(session.select_card(a), Transition::Ignored(IgnoreReason::Matched));
    assert_eq!(session.move_count(), 1);
    assert_eq!(session.matched_count(), 1);
}

#[test]
fn test_out_of_range_selection_is_ignored() {
    let (mut session, _) = new_session(2, false);
    assert_eq!(
        session.select_card(99),
        Transition::Ignored(IgnoreReason::NoSuchSlot(99))
    );
    assert_eq!(session.phase(), Phase::Idle);
}

#[test]
fn test_mismatch_stays_up_until_delay_elapses() {
    let (mut session, _) = new_session(4, false);
    let open = open_pairs(&session);
    let (a, b) = (open[0][0], open[1][0]);
    session.select_card(a);
    session.select_card(b);

    assert!(session.advance(Duration::from_millis(699)).is_empty());
    assert!(*session.board().get(a).unwrap().face_up());
    assert!(*session.board().get(b).unwrap().face_up());

    let fired = session.advance(Duration::from_millis(1));
    assert_eq!(
        fired,
        vec![Transition::Applied(Effect::FlippedBack {
            first: a,
            second: b,
            lost: false
        })]
    );
    assert!(!*session.board().get(a).unwrap().face_up());
    assert!(!*session.board().get(b).unwrap().face_up());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.is_locked());
}

#[test]
fn test_single_player_win() {
    let (mut session, _) = new_session(3, false);

    for _ in 0..2 {
        let result = match_one(&mut session);
        assert!(matches!(
            result,
            Transition::Applied(Effect::Matched { outcome: None, .. })
        ));
    }
    let result = match_one(&mut session);

    assert!(matches!(
        result,
        Transition::Applied(Effect::Matched {
            outcome: Some(Outcome::SoloWin),
            ..
        })
    ));
    assert_eq!(session.matched_count(), 3);
    assert_eq!(session.move_count(), 3);
    assert_eq!(session.phase(), Phase::Won(Outcome::SoloWin));
    assert_eq!(session.message().as_deref(), Some("You won! 🎉"));
    assert_eq!(session.aggregates().wins(), 1);
    assert_eq!(session.aggregates().games_played(), 1);
    assert_eq!(session.aggregates().losses(), 0);
}

#[test]
fn test_move_limit_loss() {
    let (mut session, _) = new_session(2, false);

    for _ in 0..11 {
        let fired = mismatch_one(&mut session);
        assert!(matches!(
            fired.as_slice(),
            [Transition::Applied(Effect::FlippedBack { lost: false, .. })]
        ));
    }
    assert_eq!(session.moves_remaining(), 1);

    let fired = mismatch_one(&mut session);
    assert!(matches!(
        fired.as_slice(),
        [Transition::Applied(Effect::FlippedBack { lost: true, .. })]
    ));
    assert_eq!(session.move_count(), 12);
    assert_eq!(session.phase(), Phase::Lost);
    assert!(session.board().slots().iter().all(|s| *s.disabled()));
    assert_eq!(session.aggregates().losses(), 1);
    assert_eq!(session.aggregates().games_played(), 1);
    assert_eq!(session.message().as_deref(), Some("You lost — try again!"));

    assert_eq!(session.select_card(0), Transition::Ignored(IgnoreReason::Disabled));
}

#[test]
fn test_match_past_move_limit_still_wins() {
    // Limit of two moves.
    let mut session = limited_session(2, 1);
    let fired = mismatch_one(&mut session);
    assert!(matches!(
        fired.as_slice(),
        [Transition::Applied(Effect::FlippedBack { lost: false, .. })]
    ));

    match_one(&mut session);
    assert_eq!(session.move_count(), 2);
    assert_ne!(session.phase(), Phase::Lost);
    let result = match_one(&mut session);

    assert!(matches!(
        result,
        Transition::Applied(Effect::Matched {
            outcome: Some(Outcome::SoloWin),
            ..
        })
    ));
    assert_eq!(session.move_count(), 3);
    assert_eq!(session.phase(), Phase::Won(Outcome::SoloWin));
    assert_eq!(session.aggregates().wins(), 1);
    assert_eq!(session.aggregates().losses(), 0);
}

#[test]
fn test_match_on_last_allowed_move_does_not_lose() {
    // Limit of four moves.
    let mut session = limited_session(4, 1);
    for _ in 0..3 {
        let fired = mismatch_one(&mut session);
        assert!(matches!(
            fired.as_slice(),
            [Transition::Applied(Effect::FlippedBack { lost: false, .. })]
        ));
    }

    let result = match_one(&mut session);
    assert!(matches!(
        result,
        Transition::Applied(Effect::Matched { outcome: None, .. })
    ));
    assert_eq!(session.move_count(), 4);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.aggregates().losses(), 0);

    let fired = mismatch_one(&mut session);
    assert!(matches!(
        fired.as_slice(),
        [Transition::Applied(Effect::FlippedBack { lost: true, .. })]
    ));
    assert_eq!(session.phase(), Phase::Lost);
    assert_eq!(session.aggregates().losses(), 1);
}

#[test]
fn test_mismatch_switches_player_match_does_not() {
    let (mut session, _) = new_session(4, true);
    assert_eq!(session.current_player(), PlayerId::One);
    assert_eq!(session.turn_note(), Some(TurnNote::Turn(PlayerId::One)));

    mismatch_one(&mut session);
    assert_eq!(session.current_player(), PlayerId::Two);
    assert_eq!(session.turn_note(), Some(TurnNote::Turn(PlayerId::Two)));

    match_one(&mut session);
    assert_eq!(session.current_player(), PlayerId::Two);
    assert_eq!(session.scores(), Scores::new(0, 1));
    assert_eq!(session.turn_note(), Some(TurnNote::FoundPair(PlayerId::Two)));

    mismatch_one(&mut session);
    assert_eq!(session.current_player(), PlayerId::One);
}

#[test]
fn test_single_player_has_no_turn_text() {
    let (mut session, _) = new_session(4, false);
    mismatch_one(&mut session);
    assert_eq!(session.turn_note(), None);
    assert_eq!(session.current_player(), PlayerId::One);
}

#[test]
fn test_two_player_tie() {
    let (mut session, _) = new_session(4, true);
    match_one(&mut session);
    match_one(&mut session);
    mismatch_one(&mut session);
    match_one(&mut session);
    let result = match_one(&mut session);

    let expected = Outcome::Tie(Scores::new(2, 2));
    assert_eq!(session.phase(), Phase::Won(expected));
    assert!(matches!(
        result,
        Transition::Applied(Effect::Matched { outcome: Some(o), .. }) if o == expected
    ));
    let message = session.message().unwrap();
    assert!(message.contains("Tie"));
    assert!(message.contains("2–2"));
}

#[test]
fn test_two_player_winner() {
    let (mut session, _) = new_session(4, true);
    mismatch_one(&mut session);
    match_one(&mut session);
    mismatch_one(&mut session);
    match_one(&mut session);
    match_one(&mut session);
    match_one(&mut session);

    assert_eq!(session.scores(), Scores::new(3, 1));
    assert_eq!(session.message().as_deref(), Some("Player 1 wins 3–1 🎉"));
    assert_eq!(session.aggregates().wins(), 1);
}

#[test]
fn test_replay_resets_game() {
    let (mut session, _) = new_session(4, true);
    mismatch_one(&mut session);
    match_one(&mut session);
    let generation = session.generation();

    session.replay();

    assert_eq!(session.move_count(), 0);
    assert_eq!(session.matched_count(), 0);
    assert_eq!(session.scores(), Scores::default());
    assert_eq!(session.current_player(), PlayerId::One);
    assert_eq!(session.pairs(), PairCount::new(4).unwrap());
    assert_eq!(session.board().len(), 8);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.generation(), generation + 1);
    assert!(session.two_player());
    assert!(
        session
            .board()
            .slots()
            .iter()
            .all(|s| !*s.face_up() && !*s.matched() && !*s.disabled())
    );
}

#[test]
fn test_replay_after_loss_starts_fresh() {
    let aggregates = Aggregates::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()));
    let mut session = GameSession::new(
        PairCount::new(2).unwrap(),
        false,
        RulesConfig::default().with_move_limit_factor(0),
        aggregates,
        ManualScheduler::new(),
        Box::new(CountingSound::new()),
        GameRng::new(5),
    );
    mismatch_one(&mut session);
    assert_eq!(session.phase(), Phase::Lost);

    session.replay();
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.select_card(0).is_applied());
    assert_eq!(session.aggregates().losses(), 1);
}

#[test]
fn test_start_game_changes_size_and_mode() {
    let (mut session, _) = new_session(4, false);
    session.start_game(PairCount::new(6).unwrap(), true);

    assert_eq!(session.board().len(), 12);
    assert!(session.two_player());
    assert_eq!(session.turn_note(), Some(TurnNote::Turn(PlayerId::One)));
    assert_eq!(session.move_count(), 0);
}

#[test]
fn test_replay_mid_delay_cancels_flip_back() {
    let (mut session, _) = new_session(4, false);
    let open = open_pairs(&session);
    session.select_card(open[0][0]);
    session.select_card(open[1][0]);
    let stale = DeferredTask::ResolveMismatch {
        generation: session.generation(),
    };
    assert_eq!(session.scheduler().pending(), 1);

    session.replay();
    assert_eq!(session.scheduler().pending(), 0);

    session.select_card(0);
    assert!(session.settle().is_empty());
    assert_eq!(session.fire(stale), Transition::Ignored(IgnoreReason::StaleTask));
    assert_eq!(session.phase(), Phase::OneSelected);
    assert!(*session.board().get(0).unwrap().face_up());
}

#[test]
fn test_fire_without_pending_comparison_is_ignored() {
    let (mut session, _) = new_session(4, false);
    let task = DeferredTask::ResolveMismatch {
        generation: session.generation(),
    };
    assert_eq!(session.fire(task), Transition::Ignored(IgnoreReason::NothingPending));
}

#[test]
fn test_sound_toggle_silences_flips() {
    let (mut session, sound) = new_session(4, false);
    assert!(session.sound_enabled());

    assert!(!session.toggle_sound());
    assert!(!session.aggregates().sound_enabled());
    session.select_card(0);
    assert_eq!(sound.plays(), 0);

    assert!(session.toggle_sound());
    session.select_card(1);
    assert_eq!(sound.plays(), 1);
}

#[test]
fn test_aggregates_accumulate_across_games() {
    let (mut session, _) = new_session(1, false);
    match_one(&mut session);
    session.replay();
    match_one(&mut session);

    assert_eq!(session.aggregates().wins(), 2);
    assert_eq!(session.aggregates().games_played(), 2);
}
