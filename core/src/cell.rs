use serde::{Deserialize, Serialize};

/// Raw value traditionally used to mark a mine in an adjacency grid.
pub const MINE_SENTINEL: i8 = -1;

/// What lies under a cell, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    /// Number of mines among the up-to-8 surrounding cells.
    Adjacent(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacency count, with [`MINE_SENTINEL`] standing in for a mine.
    pub const fn raw(self) -> i8 {
        match self {
            Self::Mine => MINE_SENTINEL,
            Self::Adjacent(count) => count as i8,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Adjacent(0)
    }
}

/// Player-visible state of a cell. Only `Hidden` ever transitions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed(u8),
    /// The mine that ended the game.
    RevealedMine,
    /// A mine shown after the game was won.
    DisclosedMine,
}

impl Visibility {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    content: CellContent,
    visibility: Visibility,
}

impl Cell {
    pub const fn content(&self) -> CellContent {
        self.content
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn is_mine(&self) -> bool {
        self.content.is_mine()
    }

    pub const fn is_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    pub(crate) fn place_mine(&mut self) {
        self.content = CellContent::Mine;
    }

    pub(crate) fn bump_adjacency(&mut self) {
        if let CellContent::Adjacent(count) = &mut self.content {
            *count += 1;
        }
    }

    /// Moves a hidden cell to `visibility`, other cells are left untouched.
    pub(crate) fn uncover(&mut self, visibility: Visibility) -> bool {
        if self.visibility.is_hidden() {
            self.visibility = visibility;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mine_maps_to_sentinel() {
        assert_eq!(CellContent::Mine.raw(), MINE_SENTINEL);
        assert_eq!(CellContent::Adjacent(3).raw(), 3);
    }

    #[test]
    fn bump_ignores_mines() {
        let mut cell = Cell::default();
        cell.bump_adjacency();
        assert_eq!(cell.content(), CellContent::Adjacent(1));

        cell.place_mine();
        cell.bump_adjacency();
        assert_eq!(cell.content(), CellContent::Mine);
    }

    #[test]
    fn visibility_never_goes_back() {
        let mut cell = Cell::default();
        assert!(cell.uncover(Visibility::Revealed(0)));
        assert!(!cell.uncover(Visibility::Hidden));
        assert_eq!(cell.visibility(), Visibility::Revealed(0));
    }
}
