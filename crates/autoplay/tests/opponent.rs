use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;
use yahtzee_autoplay::{
    simulate_match, take_turn, AutoplayError, OpponentConfig, OpponentTurn, StepOutcome,
    VirtualClock,
};
use yahtzee_core::{
    Category, Event, EventBus, Hand, MatchState, Player, ScriptedRng, CATEGORY_COUNT,
};

fn computer_first() -> MatchState {
    MatchState::with_opening(Player::Computer, Hand::new([1; 5]).unwrap())
}

fn ms(values: &[u64]) -> Vec<Duration> {
    values.iter().map(|v| Duration::from_millis(*v)).collect()
}

#[test]
fn commits_on_threshold_after_first_roll() {
    let mut state = computer_first();
    let mut rng = ScriptedRng::with_faces(&[6, 6, 6, 6, 6]);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    let report = take_turn(
        &mut state,
        Player::Computer,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap();

    assert_eq!(report.trace.category, Some(Category::Yahtzee));
    assert_eq!(report.trace.score, 50);
    assert!(!report.trace.fallback);
    assert_eq!(report.trace.rolls, vec![[6; 5]]);
    assert!(report.trace.selections.is_empty());
    assert_eq!(report.final_hand.dice(), [6; 5]);
    assert_eq!(report.final_scores.get(Category::Sixes), 30);
    assert_eq!(clock.waits(), ms(&[1000, 500, 500]).as_slice());
    assert_eq!(state.sheet(Player::Computer).score(Category::Yahtzee), Some(50));
    assert_eq!(state.active_player(), Some(Player::Human));
}

#[test]
fn falls_back_after_last_reroll() {
    let mut state = computer_first();
    let mut rng = ScriptedRng::with_faces(&[1, 2, 4, 6, 6, 6, 6]);
    rng.push_coins(&[false, false, false, false, true, false, false, false, false, true]);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    let report = take_turn(
        &mut state,
        Player::Computer,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap();

    assert!(report.trace.fallback);
    assert_eq!(report.trace.rolls.len(), 3);
    assert_eq!(report.trace.selections.len(), 2);
    assert_eq!(report.trace.category, Some(Category::Chance));
    assert_eq!(report.trace.score, 19);
    assert_eq!(clock.waits(), ms(&[1000, 500, 500, 500, 500, 500, 500]).as_slice());
    assert_eq!(clock.elapsed(), Duration::from_millis(4000));
}

#[test]
fn empty_selection_skips_the_roll_but_spends_the_round() {
    let mut state = computer_first();
    let mut rng = ScriptedRng::with_faces(&[1, 2, 4, 6, 6, 6]);
    rng.push_coins(&[false; 5]);
    rng.push_coins(&[false, false, false, false, true]);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    let report = take_turn(
        &mut state,
        Player::Computer,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap();

    assert_eq!(report.trace.selections.len(), 2);
    assert_eq!(report.trace.selections[0], [false; 5]);
    assert_eq!(report.trace.rolls.len(), 2);
    assert!(report.trace.fallback);
    let rolls = events
        .drain()
        .filter(|event| matches!(event, Event::DiceRolled { .. }))
        .count();
    assert_eq!(rolls, 2);
}

#[test]
fn turn_events_arrive_in_order() {
    let mut state = computer_first();
    let mut rng = ScriptedRng::with_faces(&[2, 3, 4, 5, 6]);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    take_turn(
        &mut state,
        Player::Computer,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap();

    let drained: Vec<Event> = events.drain().collect();
    assert!(matches!(drained[0], Event::DiceRolled { rolls_left: 2, .. }));
    assert!(matches!(
        drained[1],
        Event::CategoryCommitted { category: Category::LargeStraight, score: 40, .. }
    ));
    assert!(matches!(
        drained[2],
        Event::TurnStarted { player: Player::Human, turns_left: 25 }
    ));
    assert_eq!(drained.len(), 3);
}

#[test]
fn opponent_turn_is_announced_once() {
    let mut state = MatchState::with_opening(Player::Human, Hand::new([1; 5]).unwrap());
    let mut rng = ScriptedRng::with_faces(&[2, 2, 2, 3, 3, 6, 6, 6, 6, 6]);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    state.roll(Player::Human, &mut rng, &mut events).unwrap();
    state
        .commit_category(Player::Human, Category::FullHouse, &mut events)
        .unwrap();
    take_turn(
        &mut state,
        Player::Computer,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap();

    let announced = events
        .drain()
        .filter(|event| matches!(event, Event::TurnStarted { player: Player::Computer, .. }))
        .count();
    assert_eq!(announced, 1);
    assert_eq!(state.active_player(), Some(Player::Human));
}

#[test]
fn refuses_to_play_out_of_turn() {
    let mut state = MatchState::with_opening(Player::Human, Hand::new([1; 5]).unwrap());
    let before = state.clone();
    let mut rng = ScriptedRng::new();
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    let err = take_turn(
        &mut state,
        Player::Computer,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap_err();

    assert!(matches!(err, AutoplayError::NotSeatTurn(Player::Computer)));
    assert_eq!(state, before);
    assert!(clock.waits().is_empty());
    assert!(events.is_empty());
}

#[test]
fn policy_can_play_the_human_seat() {
    let mut state = MatchState::with_opening(Player::Human, Hand::new([1; 5]).unwrap());
    let mut rng = ScriptedRng::with_faces(&[4, 4, 4, 4, 1]);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    let report = take_turn(
        &mut state,
        Player::Human,
        &OpponentConfig::default(),
        &mut rng,
        &mut clock,
        &mut events,
    )
    .unwrap();

    assert_eq!(report.trace.seat, Player::Human);
    // Fours 16 >= 12, three of a kind 17 < 20, four of a kind 17 < 18.
    assert_eq!(report.trace.category, Some(Category::Fours));
    assert_eq!(state.active_player(), Some(Player::Computer));
}

#[test]
fn single_steps_report_waits_until_commit() {
    let mut state = computer_first();
    let mut rng = ScriptedRng::with_faces(&[5, 5, 5, 5, 5]);
    let mut events = EventBus::default();
    let mut turn = OpponentTurn::new(Player::Computer, OpponentConfig::default());

    let first = turn.step(&mut state, &mut rng, &mut events).unwrap();
    assert_eq!(first, StepOutcome::Wait(Duration::from_millis(1000)));
    assert!(!state.has_rolled());
    turn.step(&mut state, &mut rng, &mut events).unwrap();
    turn.step(&mut state, &mut rng, &mut events).unwrap();
    assert_eq!(state.hand().dice(), [5; 5]);
    match turn.step(&mut state, &mut rng, &mut events).unwrap() {
        StepOutcome::Committed(report) => {
            assert_eq!(report.trace.category, Some(Category::Yahtzee));
        }
        other => panic!("expected commit, got {other:?}"),
    }
    assert!(turn.is_done());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn simulated_turns_respect_roll_and_category_limits(seed in any::<u64>()) {
        let simulated = simulate_match(seed, &OpponentConfig::default()).unwrap();
        let mut used: [HashSet<Category>; 2] = [HashSet::new(), HashSet::new()];
        for trace in &simulated.traces {
            prop_assert!((1..=3).contains(&trace.rolls.len()));
            prop_assert!(trace.selections.len() <= 2);
            let category = trace.category.expect("every turn commits");
            let seat = match trace.seat {
                Player::Human => 0,
                Player::Computer => 1,
            };
            prop_assert!(used[seat].insert(category));
        }
        prop_assert_eq!(used[0].len(), CATEGORY_COUNT);
        prop_assert_eq!(used[1].len(), CATEGORY_COUNT);
        let result = &simulated.result;
        prop_assert_eq!(
            result.my_points,
            simulated.state.sheet(Player::Human).total().unwrap_or(0)
        );
    }
}
