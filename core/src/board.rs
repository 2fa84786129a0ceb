use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Mine grid plus per-cell visibility, stored row-major.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    size: Coord2,
    cells: Array2<Cell>,
    mine_count: CellCount,
    completed: bool,
}

impl Board {
    /// Lays `mines` on an empty grid and counts adjacency around each of them.
    pub(crate) fn with_mines(config: GameConfig, mines: &[Coord2]) -> Self {
        let mut cells: Array2<Cell> = Array2::default(config.size().to_nd_index());

        for &coords in mines {
            cells[coords.to_nd_index()].place_mine();
        }

        for &coords in mines {
            for neighbor in cells.iter_neighbors(coords) {
                cells[neighbor.to_nd_index()].bump_adjacency();
            }
        }

        let count = cells.iter().filter(|cell| cell.is_mine()).count();
        if count != usize::from(config.mines()) {
            log::warn!(
                "Board mine count mismatch, actual: {}, requested: {}",
                count,
                config.mines()
            );
        }

        Self {
            size: config.size(),
            cells,
            mine_count: config.mines(),
            completed: false,
        }
    }

    /// Builds a board with a fixed mine layout, duplicates are collapsed.
    pub fn from_mine_coords(height: i32, width: i32, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Vec<Coord2> = mine_coords.to_vec();
        mines.sort_unstable();
        mines.dedup();

        let mine_count =
            i32::try_from(mines.len()).map_err(|_| GameError::InvalidMineCount {
                max: CellCount::MAX,
            })?;
        let config = GameConfig::new(height, width, mine_count)?;

        if mines
            .iter()
            .any(|&(row, col)| row >= config.height() || col >= config.width())
        {
            return Err(GameError::OutOfBounds);
        }

        Ok(Self::with_mines(config, &mines))
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn height(&self) -> Coord {
        self.size.0
    }

    pub fn width(&self) -> Coord {
        self.size.1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Latches completion, repeated calls are no-ops.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Array2<Cell> {
        &mut self.cells
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Converts caller-supplied coordinates into board coordinates.
    pub fn validate_coords(&self, row: i32, col: i32) -> Result<Coord2> {
        let row = Coord::try_from(row).ok().filter(|&row| row < self.height());
        let col = Coord::try_from(col).ok().filter(|&col| col < self.width());
        row.zip(col).ok_or(GameError::OutOfBounds)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// Counts mines around `coords` straight from the layout.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        let mut count = 0;
        for neighbor in self.iter_neighbors(coords) {
            if self[neighbor].is_mine() {
                count += 1;
            }
        }
        count
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
