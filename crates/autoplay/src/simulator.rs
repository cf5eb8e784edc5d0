use crate::{
    take_turn, AutoplayError, MatchSummary, OpponentConfig, SimulationReport, TurnTrace,
    VirtualClock,
};
use std::time::Duration;
use tracing::{debug, info};
use yahtzee_core::{EventBus, MatchResult, MatchState, RngState, TURNS_PER_MATCH};

#[derive(Debug, Clone)]
pub struct SimulatedMatch {
    pub seed: u64,
    pub result: MatchResult,
    pub traces: Vec<TurnTrace>,
    pub state: MatchState,
    /// Time the opponent would have spent waiting on a real clock.
    pub elapsed: Duration,
}

impl SimulatedMatch {
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: self.seed,
            result: self.result.clone(),
            virtual_ms: self.elapsed.as_millis() as u64,
            turns: self.traces.clone(),
        }
    }
}

/// Plays both seats with the opponent policy on a virtual clock. The same
/// seed always produces the same match.
pub fn simulate_match(
    seed: u64,
    config: &OpponentConfig,
) -> Result<SimulatedMatch, AutoplayError> {
    let mut rng = RngState::from_seed(seed);
    let mut clock = VirtualClock::new();
    let mut events = EventBus::default();
    let mut state = MatchState::new(&mut rng);
    let mut traces = Vec::with_capacity(usize::from(TURNS_PER_MATCH));

    while let Some(seat) = state.active_player() {
        let report = take_turn(&mut state, seat, config, &mut rng, &mut clock, &mut events)?;
        let emitted = events.drain().count();
        debug!(seed, seat = %seat, emitted, turns_left = state.turns_left(), "turn simulated");
        traces.push(report.trace);
    }

    let result = state.result().cloned().ok_or(AutoplayError::MissingResult)?;
    info!(
        seed,
        outcome = %result.outcome,
        player = result.my_points,
        opponent = result.opponent_points,
        "match simulated"
    );
    Ok(SimulatedMatch {
        seed,
        result,
        traces,
        state,
        elapsed: clock.elapsed(),
    })
}

/// `games` matches on consecutive seeds starting at `base_seed`.
pub fn simulate_matches(
    base_seed: u64,
    games: u32,
    config: &OpponentConfig,
) -> Result<SimulationReport, AutoplayError> {
    let mut matches = Vec::with_capacity(games as usize);
    for offset in 0..games {
        let simulated = simulate_match(base_seed.wrapping_add(u64::from(offset)), config)?;
        matches.push(simulated.summary());
    }
    Ok(SimulationReport::new(matches))
}
