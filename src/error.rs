//! Errors raised at the boundary of the engine

use crate::board::{Cell, Player};

/// Reasons a move can be refused by [`BoardState::place`](crate::board::BoardState::place)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell is out of range, the board has {cells} cells")]
    OutOfRange { cells: usize },

    #[error("cell is already taken by {0}")]
    Occupied(Cell),

    #[error("it is {expected}'s turn")]
    WrongTurn { expected: Player },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid board size {0}, boards must be at least 1x1")]
    InvalidSize(usize),

    #[error("invalid move at cell {index}: {reason}")]
    InvalidMove { index: usize, reason: MoveError },

    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("failed to build the search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Returns the move refusal reason, if this is an [`Error::InvalidMove`]
    pub fn move_error(&self) -> Option<MoveError> {
        match self {
            Error::InvalidMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
