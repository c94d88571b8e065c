//! Errors raised when building or advancing a board state.

use thiserror::Error;

/// Contract violations detected by [`BoardState`](super::BoardState).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("cube snapshot has {actual} cells, expected {expected}")]
    WrongCellCount { expected: usize, actual: usize },

    #[error("cell {index} holds invalid value {value}")]
    InvalidCellValue { index: usize, value: i8 },

    #[error("both players own a winning line")]
    ConflictingWinners,

    #[error("move {index} is not legal in this position")]
    IllegalMove { index: usize },

    #[error("the game is already over")]
    GameOver,
}
