use serde::Serialize;

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod game;
mod generator;
mod types;

/// Validated board parameters, sides in `[MIN_SIDE, MAX_SIDE]` and at least one safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub fn new(height: i32, width: i32, mines: i32) -> Result<Self> {
        let height = Self::check_side(height)?;
        let width = Self::check_side(width)?;

        let max = mult(height, width) - 1;
        let mines = CellCount::try_from(mines)
            .ok()
            .filter(|mines| (1..=max).contains(mines))
            .ok_or(GameError::InvalidMineCount { max })?;

        Ok(Self {
            size: (height, width),
            mines,
        })
    }

    fn check_side(side: i32) -> Result<Coord> {
        Coord::try_from(side)
            .ok()
            .filter(|side| (MIN_SIDE..=MAX_SIDE).contains(side))
            .ok_or(GameError::InvalidDimension)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Outcome of a single open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    NotOver,
    Win,
    Lose,
}

impl GameStatus {
    /// Whether the game cannot accept any more moves after this outcome
    pub const fn is_final(self) -> bool {
        match self {
            Self::NotOver => false,
            Self::Win => true,
            Self::Lose => true,
        }
    }
}
