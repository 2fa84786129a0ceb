use thiserror::Error;

use crate::{CellCount, MAX_SIDE, MIN_SIDE};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Height and width must be between {} and {}", MIN_SIDE, MAX_SIDE)]
    InvalidDimension,
    #[error("Mine count must be between 1 and {max}")]
    InvalidMineCount { max: CellCount },
    #[error("Coordinates are outside of the board")]
    OutOfBounds,
    #[error("Cell was already revealed")]
    AlreadyRevealed,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
