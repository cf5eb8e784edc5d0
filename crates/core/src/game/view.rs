use crate::*;
use serde::Serialize;

/// Read-only snapshot for a front end to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchView {
    pub hand: [u8; DICE_COUNT],
    pub selected: [bool; DICE_COUNT],
    pub rolls_left: u8,
    pub turns_left: u8,
    pub active_player: Option<Player>,
    pub phase: TurnPhase,
    pub player_sheet: [(u32, bool); SLOT_COUNT],
    pub opponent_sheet: [(u32, bool); SLOT_COUNT],
    /// What the turn owner would score in each still-open category; only
    /// present after the first roll of a turn.
    pub candidates: Option<[Option<u32>; CATEGORY_COUNT]>,
    pub finished: bool,
    pub result: Option<MatchResult>,
    pub version: u64,
}

impl MatchState {
    pub fn view(&self) -> MatchView {
        MatchView {
            hand: self.hand.dice(),
            selected: self.selected,
            rolls_left: self.rolls_left,
            turns_left: self.turns_left,
            active_player: self.active_player(),
            phase: self.phase(),
            player_sheet: self.sheet(Player::Human).slots(),
            opponent_sheet: self.sheet(Player::Computer).slots(),
            candidates: self.candidate_scores(),
            finished: self.finished,
            result: self.result.clone(),
            version: self.version,
        }
    }

    pub fn candidate_scores(&self) -> Option<[Option<u32>; CATEGORY_COUNT]> {
        let player = self.active_player()?;
        if !self.has_rolled() {
            return None;
        }
        let scores = score_hand(&self.hand);
        let sheet = self.sheet(player);
        let mut out = [None; CATEGORY_COUNT];
        for (category, score) in scores.iter() {
            if !sheet.is_filled(category) {
                out[category.index()] = Some(score);
            }
        }
        Some(out)
    }
}
