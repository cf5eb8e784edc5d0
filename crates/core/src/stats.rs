use crate::{MatchResult, Outcome};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Aggregate over a player's finished matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub games_played: usize,
    pub games_won: usize,
    pub games_drawn: usize,
    pub games_lost: usize,
    pub average_score: f64,
    pub max_score: u32,
    pub min_score: u32,
    /// Largest winning margin; `None` without a win.
    pub biggest_win: Option<u32>,
    /// Largest losing margin; `None` without a loss.
    pub biggest_loss: Option<u32>,
    pub bonuses_gained: usize,
    pub yahtzees_gained: usize,
}

impl MatchStats {
    pub fn from_results(results: &[MatchResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let count_outcome =
            |outcome: Outcome| results.iter().filter(|r| r.outcome == outcome).count();
        let total: u64 = results.iter().map(|r| u64::from(r.my_points)).sum();
        let biggest_win = results
            .iter()
            .filter(|r| r.outcome == Outcome::Win)
            .map(|r| r.my_points.saturating_sub(r.opponent_points))
            .max();
        let biggest_loss = results
            .iter()
            .filter(|r| r.outcome == Outcome::Lose)
            .map(|r| r.opponent_points.saturating_sub(r.my_points))
            .max();

        Some(Self {
            games_played: results.len(),
            games_won: count_outcome(Outcome::Win),
            games_drawn: count_outcome(Outcome::Draw),
            games_lost: count_outcome(Outcome::Lose),
            average_score: total as f64 / results.len() as f64,
            max_score: results.iter().map(|r| r.my_points).max().unwrap_or(0),
            min_score: results.iter().map(|r| r.my_points).min().unwrap_or(0),
            biggest_win,
            biggest_loss,
            bonuses_gained: results.iter().filter(|r| r.got_bonus).count(),
            yahtzees_gained: results.iter().filter(|r| r.got_yahtzee).count(),
        })
    }

    /// Plain-text summary suitable for sharing.
    pub fn report(&self, owner: &str) -> String {
        let margin =
            |value: Option<u32>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
        let mut out = String::new();
        let _ = writeln!(out, "Yahtzee statistics for {owner}");
        let _ = writeln!(out, "Games played: {}", self.games_played);
        let _ = writeln!(out, "Games won: {}", self.games_won);
        let _ = writeln!(out, "Games drawn: {}", self.games_drawn);
        let _ = writeln!(out, "Games lost: {}", self.games_lost);
        let _ = writeln!(out, "Average score: {:.2}", self.average_score);
        let _ = writeln!(out, "Maximum score: {}", self.max_score);
        let _ = writeln!(out, "Minimum score: {}", self.min_score);
        let _ = writeln!(out, "Biggest win: {}", margin(self.biggest_win));
        let _ = writeln!(out, "Biggest loss: {}", margin(self.biggest_loss));
        let _ = writeln!(out, "Bonuses gained: {}", self.bonuses_gained);
        let _ = writeln!(out, "Yahtzee gained: {}", self.yahtzees_gained);
        out
    }
}
