use crate::{
    fallback_category, preferred_category, random_selection, AutoplayError, Clock,
    OpponentConfig, TurnTrace,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use yahtzee_core::{
    score_hand, Category, CategoryScores, EventBus, Hand, MatchError, MatchState, Player,
    RandomSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStep {
    Think,
    PrepareDice,
    FirstRoll,
    Evaluate { round: u8 },
    Reroll { round: u8 },
    Fallback,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step done; wait this long before the next one.
    Wait(Duration),
    Committed(TurnReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub final_hand: Hand,
    pub final_scores: CategoryScores,
    pub trace: TurnTrace,
}

/// One opponent turn, advanced a step at a time so a front-end can show each
/// roll before the next one happens.
#[derive(Debug, Clone)]
pub struct OpponentTurn {
    seat: Player,
    config: OpponentConfig,
    step: TurnStep,
    trace: TurnTrace,
}

impl OpponentTurn {
    pub fn new(seat: Player, config: OpponentConfig) -> Self {
        Self {
            seat,
            config,
            step: TurnStep::Think,
            trace: TurnTrace::new(seat),
        }
    }

    pub fn current_step(&self) -> TurnStep {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.step == TurnStep::Done
    }

    pub fn step(
        &mut self,
        state: &mut MatchState,
        rng: &mut impl RandomSource,
        events: &mut EventBus,
    ) -> Result<StepOutcome, AutoplayError> {
        match self.step {
            TurnStep::Think => {
                self.ensure_seat(state)?;
                self.step = TurnStep::PrepareDice;
                Ok(StepOutcome::Wait(self.config.think_delay()))
            }
            TurnStep::PrepareDice => {
                self.ensure_seat(state)?;
                state.start_turn(self.seat, events)?;
                self.step = TurnStep::FirstRoll;
                Ok(StepOutcome::Wait(self.config.step_delay()))
            }
            TurnStep::FirstRoll => {
                let hand = state.roll(self.seat, rng, events)?;
                self.trace.rolls.push(hand.dice());
                self.step = self.after_round(None);
                Ok(StepOutcome::Wait(self.config.step_delay()))
            }
            TurnStep::Evaluate { round } => {
                let scores = score_hand(&state.hand());
                let sheet = state.sheet(self.seat);
                let preferred = preferred_category(&scores, sheet, &self.config.min_scores);
                if let Some(category) = preferred {
                    debug!(seat = %self.seat, round, category = category.id(), "threshold met");
                    return self.commit(state, category, false, events);
                }
                let mask = random_selection(rng);
                state.set_selection(self.seat, mask, events)?;
                self.trace.selections.push(mask);
                self.step = TurnStep::Reroll { round };
                Ok(StepOutcome::Wait(self.config.step_delay()))
            }
            TurnStep::Reroll { round } => {
                if state.selected().iter().any(|selected| *selected) {
                    let hand = state.roll(self.seat, rng, events)?;
                    self.trace.rolls.push(hand.dice());
                } else {
                    debug!(seat = %self.seat, round, "nothing selected, roll skipped");
                }
                self.step = self.after_round(Some(round));
                Ok(StepOutcome::Wait(self.config.step_delay()))
            }
            TurnStep::Fallback => {
                let scores = score_hand(&state.hand());
                let category = fallback_category(&scores, state.sheet(self.seat))
                    .ok_or(AutoplayError::NoOpenCategory(self.seat))?;
                self.commit(state, category, true, events)
            }
            TurnStep::Done => Err(AutoplayError::TurnOver),
        }
    }

    fn after_round(&self, finished: Option<u8>) -> TurnStep {
        let next = finished.map_or(0, |round| round + 1);
        if next < self.config.rounds() {
            TurnStep::Evaluate { round: next }
        } else {
            TurnStep::Fallback
        }
    }

    fn ensure_seat(&self, state: &MatchState) -> Result<(), AutoplayError> {
        if state.is_finished() {
            return Err(MatchError::MatchAlreadyFinished.into());
        }
        if state.active_player() != Some(self.seat) {
            return Err(AutoplayError::NotSeatTurn(self.seat));
        }
        Ok(())
    }

    fn commit(
        &mut self,
        state: &mut MatchState,
        category: Category,
        fallback: bool,
        events: &mut EventBus,
    ) -> Result<StepOutcome, AutoplayError> {
        let final_hand = state.hand();
        let final_scores = score_hand(&final_hand);
        let score = state.commit_category(self.seat, category, events)?;
        self.trace.category = Some(category);
        self.trace.score = score;
        self.trace.fallback = fallback;
        self.step = TurnStep::Done;
        info!(
            seat = %self.seat,
            hand = %final_hand,
            category = category.id(),
            score,
            fallback,
            "opponent committed"
        );
        Ok(StepOutcome::Committed(TurnReport {
            final_hand,
            final_scores,
            trace: self.trace.clone(),
        }))
    }
}

/// Runs the remaining steps of `turn`, sleeping on `clock` in between.
pub fn drive_turn(
    turn: &mut OpponentTurn,
    state: &mut MatchState,
    rng: &mut impl RandomSource,
    clock: &mut impl Clock,
    events: &mut EventBus,
) -> Result<TurnReport, AutoplayError> {
    loop {
        match turn.step(state, rng, events)? {
            StepOutcome::Wait(delay) => clock.sleep(delay),
            StepOutcome::Committed(report) => return Ok(report),
        }
    }
}

pub fn take_turn(
    state: &mut MatchState,
    seat: Player,
    config: &OpponentConfig,
    rng: &mut impl RandomSource,
    clock: &mut impl Clock,
    events: &mut EventBus,
) -> Result<TurnReport, AutoplayError> {
    let mut turn = OpponentTurn::new(seat, config.clone());
    drive_turn(&mut turn, state, rng, clock, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VirtualClock;
    use yahtzee_core::ScriptedRng;

    fn opening() -> MatchState {
        MatchState::with_opening(Player::Computer, Hand::new([1; 5]).unwrap())
    }

    #[test]
    fn steps_advance_in_order() {
        let mut state = opening();
        let mut rng = ScriptedRng::new();
        rng.push_faces(&[1, 2, 4, 6, 6, 3]);
        rng.push_coins(&[false, false, false, false, true]);
        let mut events = EventBus::default();
        let mut turn = OpponentTurn::new(Player::Computer, OpponentConfig::default());

        let mut seen = vec![turn.current_step()];
        while !turn.is_done() {
            turn.step(&mut state, &mut rng, &mut events).unwrap();
            seen.push(turn.current_step());
        }
        assert_eq!(
            &seen[..5],
            &[
                TurnStep::Think,
                TurnStep::PrepareDice,
                TurnStep::FirstRoll,
                TurnStep::Evaluate { round: 0 },
                TurnStep::Reroll { round: 0 },
            ]
        );
        assert_eq!(seen.last(), Some(&TurnStep::Done));
    }

    #[test]
    fn finished_turn_refuses_more_steps() {
        let mut state = opening();
        let mut rng = ScriptedRng::new();
        rng.push_faces(&[5, 5, 5, 5, 5]);
        let mut events = EventBus::default();
        let mut clock = VirtualClock::new();
        let mut turn = OpponentTurn::new(Player::Computer, OpponentConfig::default());
        drive_turn(&mut turn, &mut state, &mut rng, &mut clock, &mut events).unwrap();
        let err = turn.step(&mut state, &mut rng, &mut events).unwrap_err();
        assert!(matches!(err, AutoplayError::TurnOver));
    }

    #[test]
    fn zero_rounds_goes_straight_to_fallback() {
        let mut state = opening();
        let mut rng = ScriptedRng::new();
        rng.push_faces(&[1, 2, 4, 6, 6]);
        let mut events = EventBus::default();
        let mut clock = VirtualClock::new();
        let config = OpponentConfig {
            extra_rounds: 0,
            ..OpponentConfig::default()
        };
        let report =
            take_turn(&mut state, Player::Computer, &config, &mut rng, &mut clock, &mut events)
                .unwrap();
        assert!(report.trace.fallback);
        assert_eq!(report.trace.rolls.len(), 1);
        assert_eq!(report.trace.category, Some(Category::Chance));
        assert_eq!(report.trace.score, 19);
    }
}
