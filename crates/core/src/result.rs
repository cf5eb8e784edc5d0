use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Match outcome from the human player's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Draw,
    Lose,
}

impl Outcome {
    pub fn from_totals(player_total: u32, opponent_total: u32) -> Self {
        match player_total.cmp(&opponent_total) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Lose,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Draw => "DRAW",
            Outcome::Lose => "LOSE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record handed to persistence when a match ends. Field names are the
/// shape stored by every backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub my_points: u32,
    pub opponent_points: u32,
    pub outcome: Outcome,
    pub got_bonus: bool,
    pub got_yahtzee: bool,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl MatchResult {
    pub fn margin(&self) -> i64 {
        i64::from(self.my_points) - i64::from(self.opponent_points)
    }
}

/// Where finished matches go. Called once per finished match.
pub trait ResultSink {
    type Error: fmt::Debug + fmt::Display;

    fn save_result(&mut self, result: &MatchResult) -> Result<(), Self::Error>;
}

impl ResultSink for Vec<MatchResult> {
    type Error = Infallible;

    fn save_result(&mut self, result: &MatchResult) -> Result<(), Self::Error> {
        self.push(result.clone());
        Ok(())
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_follows_totals() {
        assert_eq!(Outcome::from_totals(200, 150), Outcome::Win);
        assert_eq!(Outcome::from_totals(150, 200), Outcome::Lose);
        assert_eq!(Outcome::from_totals(180, 180), Outcome::Draw);
    }

    #[test]
    fn record_keeps_camel_case_shape() {
        let result = MatchResult {
            my_points: 210,
            opponent_points: 190,
            outcome: Outcome::Win,
            got_bonus: true,
            got_yahtzee: false,
            timestamp: 1_700_000_000_000,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["myPoints"], 210);
        assert_eq!(value["opponentPoints"], 190);
        assert_eq!(value["outcome"], "WIN");
        assert_eq!(value["gotBonus"], true);
        assert_eq!(value["gotYahtzee"], false);
        assert_eq!(value["timestamp"], 1_700_000_000_000u64);
    }
}
