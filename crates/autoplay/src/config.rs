use serde::{Deserialize, Serialize};
use std::time::Duration;
use yahtzee_core::{CATEGORY_COUNT, ROLLS_PER_TURN};

/// Lowest score per category the opponent accepts before its last roll.
pub const DEFAULT_MIN_SCORES: [u32; CATEGORY_COUNT] =
    [3, 6, 9, 12, 15, 18, 20, 18, 25, 30, 40, 20, 50];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    pub min_scores: [u32; CATEGORY_COUNT],
    pub extra_rounds: u8,
    pub think_delay_ms: u64,
    pub step_delay_ms: u64,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            min_scores: DEFAULT_MIN_SCORES,
            extra_rounds: 2,
            think_delay_ms: 1000,
            step_delay_ms: 500,
        }
    }
}

impl OpponentConfig {
    /// Reroll rounds after the first roll, capped by the rolls a turn allows.
    pub fn rounds(&self) -> u8 {
        self.extra_rounds.min(ROLLS_PER_TURN - 1)
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}
