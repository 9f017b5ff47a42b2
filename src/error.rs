use thiserror::Error;

use crate::settlement::Chips;
use crate::{Action, Card, GamePhase};

/// Reasons a wager is refused at round start. No state changes when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WagerError {
    #[error("Wager must be positive, got {0}")]
    NotPositive(Chips),

    #[error("Bet amount {wager} exceeds player balance {balance}")]
    ExceedsPlayerBalance { wager: Chips, balance: Chips },

    #[error("Bet amount {wager} exceeds dealer balance {balance}")]
    ExceedsDealerBalance { wager: Chips, balance: Chips },

    #[error("Bet amount {wager} would overflow balance {balance}")]
    ExceedsTableLimit { wager: Chips, balance: Chips },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Drawing from an exhausted pool. Indicates a dealing bug, the round is aborted.
    #[error("Card pool is empty")]
    EmptyPool,

    #[error("Card {0} appears more than once in the pool")]
    DuplicateCard(Card),

    #[error(transparent)]
    Wager(#[from] WagerError),

    #[error("Cannot {action} during {phase:?}")]
    IllegalAction { action: Action, phase: GamePhase },

    #[error("A round is already in progress")]
    RoundInProgress,

    #[error("No round has been dealt")]
    NoActiveRound,

    #[error("Invalid table config: {0}")]
    InvalidConfig(String),
}
