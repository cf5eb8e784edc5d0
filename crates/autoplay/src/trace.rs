use crate::AutoplayError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use yahtzee_core::{Category, MatchResult, MatchStats, Player, DICE_COUNT};

/// What the opponent did during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTrace {
    pub seat: Player,
    /// Hand after every roll, the opening roll first.
    pub rolls: Vec<[u8; DICE_COUNT]>,
    /// Dice marked for rerolling, one entry per reroll round.
    pub selections: Vec<[bool; DICE_COUNT]>,
    pub category: Option<Category>,
    pub score: u32,
    /// Category chosen without a threshold after the last roll.
    pub fallback: bool,
}

impl TurnTrace {
    pub fn new(seat: Player) -> Self {
        Self {
            seat,
            rolls: Vec::new(),
            selections: Vec::new(),
            category: None,
            score: 0,
            fallback: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub result: MatchResult,
    pub virtual_ms: u64,
    pub turns: Vec<TurnTrace>,
}

impl MatchSummary {
    pub fn fallbacks(&self) -> usize {
        self.turns.iter().filter(|turn| turn.fallback).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub matches: Vec<MatchSummary>,
    pub stats: Option<MatchStats>,
}

impl SimulationReport {
    pub fn new(matches: Vec<MatchSummary>) -> Self {
        let results: Vec<MatchResult> = matches.iter().map(|m| m.result.clone()).collect();
        let stats = MatchStats::from_results(&results);
        Self { matches, stats }
    }

    pub fn to_text_report(&self) -> String {
        let mut lines = vec![format!("matches: {}", self.matches.len()), String::new()];
        for summary in &self.matches {
            let result = &summary.result;
            lines.push(format!(
                "  seed {:>20} | {} {:>3} - {:<3} | bonus={} yahtzee={} fallbacks={} virtual_ms={}",
                summary.seed,
                result.outcome,
                result.my_points,
                result.opponent_points,
                result.got_bonus,
                result.got_yahtzee,
                summary.fallbacks(),
                summary.virtual_ms
            ));
        }
        lines.push(String::new());
        match self.stats.as_ref() {
            Some(stats) => lines.extend(stats.report("player seat").lines().map(String::from)),
            None => lines.push("(no matches)".to_string()),
        }
        lines.join("\n")
    }
}

pub fn write_json(path: &Path, report: &SimulationReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, report: &SimulationReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_text_report())?;
    Ok(())
}

/// One JSON object per line, in turn order.
pub fn write_trace_lines(path: &Path, traces: &[TurnTrace]) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    for trace in traces {
        let line = serde_json::to_string(trace)?;
        writeln!(file, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yahtzee_core::Outcome;

    fn summary(seed: u64, mine: u32, theirs: u32) -> MatchSummary {
        let mut turn = TurnTrace::new(Player::Computer);
        turn.rolls.push([6, 6, 6, 6, 6]);
        turn.category = Some(Category::Yahtzee);
        turn.score = 50;
        MatchSummary {
            seed,
            result: MatchResult {
                my_points: mine,
                opponent_points: theirs,
                outcome: Outcome::from_totals(mine, theirs),
                got_bonus: false,
                got_yahtzee: false,
                timestamp: 0,
            },
            virtual_ms: 2000,
            turns: vec![turn],
        }
    }

    #[test]
    fn text_report_lists_matches_and_stats() {
        let report = SimulationReport::new(vec![summary(7, 200, 150), summary(8, 90, 140)]);
        let text = report.to_text_report();
        assert!(text.starts_with("matches: 2\n"));
        assert!(text.contains("WIN 200 - 150"));
        assert!(text.contains("LOSE  90 - 140"));
        assert!(text.contains("Games won: 1"));
    }

    #[test]
    fn empty_report_has_no_stats() {
        let report = SimulationReport::new(Vec::new());
        assert!(report.stats.is_none());
        assert!(report.to_text_report().ends_with("(no matches)"));
    }

    #[test]
    fn trace_lines_are_one_object_each() {
        let path = std::env::temp_dir().join(format!(
            "yahtzee_trace_{}_{}.jsonl",
            std::process::id(),
            yahtzee_core::now_ms()
        ));
        let turns = summary(1, 10, 20).turns;
        write_trace_lines(&path, &[turns[0].clone(), turns[0].clone()]).unwrap();
        let body = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);
        let parsed: Vec<TurnTrace> = body
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], turns[0]);
    }
}
