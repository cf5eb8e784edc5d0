use crate::{Category, MatchState, Player};
use thiserror::Error;

mod finish;
mod turn;
mod view;

pub use view::MatchView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("{0:?} is already filled")]
    CategoryFilled(Category),
    #[error("unknown category index {0}")]
    UnknownCategory(usize),
    #[error("no rolls left this turn")]
    NoRollsLeft,
    #[error("no dice selected to roll")]
    NothingSelected,
    #[error("dice can only be selected between rolls")]
    SelectionLocked,
    #[error("die index {0} out of range")]
    DieOutOfRange(usize),
    #[error("roll the dice before choosing a category")]
    RollRequired,
    #[error("not the {0}'s turn")]
    NotYourTurn(Player),
    #[error("turn already in progress")]
    TurnInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("match already finished")]
    MatchAlreadyFinished,
}

impl MatchState {
    /// Rejects actions from anyone but the turn owner, and everything once the
    /// match is over.
    fn ensure_active(&self, actor: Player) -> Result<(), MatchError> {
        if self.finished {
            return Err(MatchError::MatchAlreadyFinished);
        }
        if actor != self.turn {
            return Err(InvalidMove::NotYourTurn(actor).into());
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
