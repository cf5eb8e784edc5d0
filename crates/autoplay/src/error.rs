use thiserror::Error;
use yahtzee_core::{MatchError, Player};

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("match error: {0}")]
    Match(#[from] MatchError),
    #[error("it is not the {0}'s turn")]
    NotSeatTurn(Player),
    #[error("turn already completed")]
    TurnOver,
    #[error("no open category left for the {0}")]
    NoOpenCategory(Player),
    #[error("match ended without a result")]
    MissingResult,
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
