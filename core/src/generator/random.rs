use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniform mine placement from a fixed seed, every `C(total, mines)` layout is equally likely.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    strategy: Option<PlacementStrategy>,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            strategy: None,
        }
    }

    /// Forces a placement strategy instead of choosing one by density.
    pub fn with_strategy(self, strategy: PlacementStrategy) -> Self {
        Self {
            strategy: Some(strategy),
            ..self
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        let strategy = self
            .strategy
            .unwrap_or_else(|| PlacementStrategy::for_config(config));
        let total = usize::from(config.total_cells());
        let mines = usize::from(config.mines());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let positions = match strategy {
            PlacementStrategy::Sparse => place_sparse(&mut rng, total, mines),
            PlacementStrategy::Dense => place_dense(&mut rng, total, mines),
        };

        let width = usize::from(config.width());
        let mine_coords: Vec<Coord2> = positions
            .into_iter()
            .map(|index| ((index / width) as Coord, (index % width) as Coord))
            .collect();

        log::debug!(
            "Generated {}x{} board with {} mines, strategy: {:?}, seed: {}",
            config.height(),
            config.width(),
            mines,
            strategy,
            self.seed
        );
        Board::with_mines(config, &mine_coords)
    }
}

/// Draws flat indices until `mines` distinct ones are collected.
fn place_sparse(rng: &mut impl Rng, total: usize, mines: usize) -> Vec<usize> {
    let mut taken = vec![false; total];
    let mut positions = Vec::with_capacity(mines);

    while positions.len() < mines {
        let index = rng.random_range(0..total);
        if !taken[index] {
            taken[index] = true;
            positions.push(index);
        }
    }

    positions
}

/// Shuffles every flat index and keeps the first `mines`.
fn place_dense(rng: &mut impl Rng, total: usize, mines: usize) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..total).collect();
    positions.shuffle(rng);
    positions.truncate(mines);
    positions
}
