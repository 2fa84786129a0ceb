use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Board;
}

/// How mine positions are drawn, picked by density so expected work stays bounded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// Rejection sampling over random coordinates, cheap while collisions are rare.
    Sparse,
    /// Shuffle every coordinate and keep a prefix, cost independent of density.
    Dense,
}

impl PlacementStrategy {
    pub const fn for_config(config: GameConfig) -> Self {
        if config.total_cells() / 2 > config.mines() {
            Self::Sparse
        } else {
            Self::Dense
        }
    }
}

/// Generates a fresh random board, validating the parameters first.
///
/// Every call seeds its own generator from the thread-local RNG, so concurrent callers share no
/// state.
pub fn generate(height: i32, width: i32, mines: i32) -> Result<Board> {
    let config = GameConfig::new(height, width, mines)?;
    Ok(RandomBoardGenerator::new(rand::random()).generate(config))
}
