use crate::{Hand, MatchResult, RandomSource, ScoreSheet, DICE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rolls a player gets per turn, the mandatory first roll included.
pub const ROLLS_PER_TURN: u8 = 3;
/// Every category filled by both players.
pub const TURNS_PER_MATCH: u8 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::Human, Player::Computer];

    pub fn other(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::Human => 0,
            Player::Computer => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => f.write_str("player"),
            Player::Computer => f.write_str("opponent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Nothing rolled yet this turn.
    AwaitingRoll,
    /// Rolled at least once with rolls to spare: pick dice and roll, or commit.
    AwaitingSelection,
    /// Out of rolls: a category must be committed.
    CategoryRequired,
    Finished,
}

/// Everything a match needs to be resumed after an interruption. The random
/// source is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SavedMatch")]
pub struct MatchState {
    pub(crate) hand: Hand,
    pub(crate) selected: [bool; DICE_COUNT],
    pub(crate) sheets: [ScoreSheet; 2],
    pub(crate) turn: Player,
    pub(crate) rolls_left: u8,
    pub(crate) turns_left: u8,
    pub(crate) finished: bool,
    pub(crate) result: Option<MatchResult>,
    pub(crate) result_saved: bool,
    pub(crate) version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("{0} rolls left, at most {ROLLS_PER_TURN} allowed")]
    TooManyRolls(u8),
    #[error("{turns_left} turns left but {filled} categories filled")]
    TurnCountMismatch { turns_left: u8, filled: usize },
    #[error("finished flag disagrees with the turns left")]
    FinishMismatch,
    #[error("finished flag disagrees with the stored result")]
    ResultMismatch,
}

/// Wire shape of `MatchState`, checked before it becomes one.
#[derive(Deserialize)]
struct SavedMatch {
    hand: Hand,
    selected: [bool; DICE_COUNT],
    sheets: [ScoreSheet; 2],
    turn: Player,
    rolls_left: u8,
    turns_left: u8,
    finished: bool,
    #[serde(default)]
    result: Option<MatchResult>,
    #[serde(default)]
    result_saved: bool,
    #[serde(default)]
    version: u64,
}

impl TryFrom<SavedMatch> for MatchState {
    type Error = InvalidState;

    fn try_from(saved: SavedMatch) -> Result<Self, Self::Error> {
        if saved.rolls_left > ROLLS_PER_TURN {
            return Err(InvalidState::TooManyRolls(saved.rolls_left));
        }
        let filled: usize = saved.sheets.iter().map(ScoreSheet::filled_count).sum();
        if usize::from(saved.turns_left) + filled != usize::from(TURNS_PER_MATCH) {
            return Err(InvalidState::TurnCountMismatch {
                turns_left: saved.turns_left,
                filled,
            });
        }
        if saved.finished != (saved.turns_left == 0) {
            return Err(InvalidState::FinishMismatch);
        }
        if saved.finished != saved.result.is_some() {
            return Err(InvalidState::ResultMismatch);
        }
        Ok(Self {
            hand: saved.hand,
            selected: saved.selected,
            sheets: saved.sheets,
            turn: saved.turn,
            rolls_left: saved.rolls_left,
            turns_left: saved.turns_left,
            finished: saved.finished,
            result: saved.result,
            result_saved: saved.result_saved,
            version: saved.version,
        })
    }
}

impl MatchState {
    /// Random starting player and a freshly rolled hand.
    pub fn new(rng: &mut impl RandomSource) -> Self {
        let first = if rng.coin_flip() {
            Player::Human
        } else {
            Player::Computer
        };
        let hand = Hand::random(rng);
        Self::with_opening(first, hand)
    }

    pub fn with_opening(first: Player, hand: Hand) -> Self {
        Self {
            hand,
            selected: [true; DICE_COUNT],
            sheets: [ScoreSheet::new(), ScoreSheet::new()],
            turn: first,
            rolls_left: ROLLS_PER_TURN,
            turns_left: TURNS_PER_MATCH,
            finished: false,
            result: None,
            result_saved: false,
            version: 0,
        }
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn selected(&self) -> [bool; DICE_COUNT] {
        self.selected
    }

    pub fn sheet(&self, player: Player) -> &ScoreSheet {
        &self.sheets[player.index()]
    }

    /// Whose turn it is; `None` once the match is over.
    pub fn active_player(&self) -> Option<Player> {
        (!self.finished).then_some(self.turn)
    }

    pub fn rolls_left(&self) -> u8 {
        self.rolls_left
    }

    pub fn turns_left(&self) -> u8 {
        self.turns_left
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Bumped by every accepted action.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn has_rolled(&self) -> bool {
        self.rolls_left < ROLLS_PER_TURN
    }

    pub fn phase(&self) -> TurnPhase {
        if self.finished {
            return TurnPhase::Finished;
        }
        match self.rolls_left {
            ROLLS_PER_TURN => TurnPhase::AwaitingRoll,
            0 => TurnPhase::CategoryRequired,
            _ => TurnPhase::AwaitingSelection,
        }
    }
}
