use serde::Serialize;

use crate::*;

/// Owns a board and latches its completion from the outcome of each open.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Game {
    board: Board,
    last_status: Option<GameStatus>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            last_status: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_completed(&self) -> bool {
        self.board.is_completed()
    }

    /// Status returned by the most recent successful open, if any.
    pub fn last_status(&self) -> Option<GameStatus> {
        self.last_status
    }

    pub fn open(&mut self, row: i32, col: i32) -> Result<GameStatus> {
        if self.board.is_completed() {
            return Err(GameError::AlreadyEnded);
        }

        let status = open(&mut self.board, row, col)?;
        self.last_status = Some(status);

        if status.is_final() {
            self.board.mark_completed();
            log::debug!("Game ended with {:?}", status);
        }

        Ok(status)
    }
}
