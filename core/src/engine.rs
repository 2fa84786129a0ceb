use std::collections::VecDeque;

use crate::*;

/// Opens the cell at `(row, col)`, flood-filling from zero cells and disclosing every mine on a
/// win.
///
/// The board is left untouched when an error is returned. Completion is not checked or latched
/// here, see [`Game`] for that.
pub fn open(board: &mut Board, row: i32, col: i32) -> Result<GameStatus> {
    let coords = board.validate_coords(row, col)?;
    let cell = board[coords];

    if !cell.is_hidden() {
        return Err(GameError::AlreadyRevealed);
    }

    let count = match cell.content() {
        CellContent::Mine => {
            board.cell_mut(coords).uncover(Visibility::RevealedMine);
            log::debug!("Mine hit at {:?}", coords);
            return Ok(GameStatus::Lose);
        }
        CellContent::Adjacent(count) => count,
    };

    board.cell_mut(coords).uncover(Visibility::Revealed(count));
    log::debug!("Open cell at {:?}, mine count: {}", coords, count);

    if count == 0 {
        flood_fill(board, coords);
    }

    if remain_only_mines(board) {
        disclose_mines(board);
        Ok(GameStatus::Win)
    } else {
        Ok(GameStatus::NotOver)
    }
}

/// Breadth-first expansion from an already opened zero cell.
///
/// Cells are opened as they are queued, so a coordinate enters the queue at most once.
fn flood_fill(board: &mut Board, start: Coord2) {
    let mut to_visit = VecDeque::from([start]);
    let mut opened = 0usize;

    while let Some(visit_coords) = to_visit.pop_front() {
        if board[visit_coords].content() != CellContent::Adjacent(0) {
            continue;
        }

        for neighbor in board.iter_neighbors(visit_coords) {
            let cell = board[neighbor];
            // mines never border a zero cell, guarded anyway
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            let CellContent::Adjacent(count) = cell.content() else {
                continue;
            };
            board.cell_mut(neighbor).uncover(Visibility::Revealed(count));
            opened += 1;
            log::trace!("Flood opened cell at {:?}, mine count: {}", neighbor, count);

            if count == 0 {
                to_visit.push_back(neighbor);
            }
        }
    }

    log::debug!("Flood-fill from {:?} opened {} more cells", start, opened);
}

fn remain_only_mines(board: &Board) -> bool {
    board
        .cells()
        .iter()
        .filter(|cell| cell.is_hidden())
        .all(Cell::is_mine)
}

fn disclose_mines(board: &mut Board) {
    for cell in board.cells_mut().iter_mut().filter(|cell| cell.is_mine()) {
        cell.uncover(Visibility::DisclosedMine);
    }
}
