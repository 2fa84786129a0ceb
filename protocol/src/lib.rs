//! Line-delimited JSON messages exchanged with the game server.
//!
//! Every message is a single JSON object tagged with `"type"`:
//!
//! ```text
//! -> {"type":"new","width":9,"height":9,"mines_count":10}
//! <- {"type":"game_info","game_id":"…","width":9,"height":9,"mines_count":10,"completed":false,"field":[[" ",…],…]}
//! -> {"type":"turn","game_id":"…","col":3,"row":4}
//! <- {"type":"error","status":400,"error":"Cell was already revealed"}
//! ```

use sapper_core::{Board, Visibility};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    New(NewGameRequest),
    Turn(GameTurnRequest),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub width: i32,
    pub height: i32,
    pub mines_count: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTurnRequest {
    pub game_id: String,
    pub col: i32,
    pub row: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    GameInfo(GameInfoResponse),
    Error(ErrorResponse),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfoResponse {
    pub game_id: String,
    pub width: u8,
    pub height: u8,
    pub mines_count: u16,
    pub completed: bool,
    /// `height` rows of `width` symbols, see [`cell_symbol`].
    pub field: Vec<Vec<char>>,
}

impl GameInfoResponse {
    pub fn from_board(game_id: impl Into<String>, board: &Board) -> Self {
        Self {
            game_id: game_id.into(),
            width: board.width(),
            height: board.height(),
            mines_count: board.mine_count(),
            completed: board.is_completed(),
            field: field(board),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }
}

pub const HIDDEN_SYMBOL: char = ' ';
pub const EXPLODED_SYMBOL: char = 'X';
pub const MINE_SYMBOL: char = 'M';

/// Wire symbol for a cell, the only place visibility becomes visible to clients.
pub fn cell_symbol(visibility: Visibility) -> char {
    match visibility {
        Visibility::Hidden => HIDDEN_SYMBOL,
        Visibility::Revealed(count) => char::from(b'0' + count.min(8)),
        Visibility::RevealedMine => EXPLODED_SYMBOL,
        Visibility::DisclosedMine => MINE_SYMBOL,
    }
}

pub fn field(board: &Board) -> Vec<Vec<char>> {
    board
        .cells()
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|cell| cell_symbol(cell.visibility())).collect())
        .collect()
}

impl Request {
    pub fn from_json(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }
}

impl Response {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{Game, GameStatus};
    use serde_json::json;

    #[test]
    fn decodes_requests() {
        let new = Request::from_json(r#"{"type":"new","width":9,"height":8,"mines_count":10}"#);
        assert_eq!(
            new.unwrap(),
            Request::New(NewGameRequest {
                width: 9,
                height: 8,
                mines_count: 10,
            })
        );

        let turn = Request::from_json(r#"{"type":"turn","game_id":"abc","col":-1,"row":2}"#);
        assert_eq!(
            turn.unwrap(),
            Request::Turn(GameTurnRequest {
                game_id: "abc".into(),
                col: -1,
                row: 2,
            })
        );
    }

    #[test]
    fn rejects_unknown_request() {
        assert!(Request::from_json(r#"{"type":"flag","row":1,"col":1}"#).is_err());
        assert!(Request::from_json("not json").is_err());
    }

    #[test]
    fn symbols_cover_every_visibility() {
        assert_eq!(cell_symbol(Visibility::Hidden), ' ');
        assert_eq!(cell_symbol(Visibility::Revealed(0)), '0');
        assert_eq!(cell_symbol(Visibility::Revealed(8)), '8');
        assert_eq!(cell_symbol(Visibility::RevealedMine), 'X');
        assert_eq!(cell_symbol(Visibility::DisclosedMine), 'M');
    }

    #[test]
    fn game_info_projects_board_row_major() {
        let board = Board::from_mine_coords(2, 3, &[(0, 0)]).unwrap();
        let mut game = Game::new(board);
        assert_eq!(game.open(1, 2), Ok(GameStatus::NotOver));

        let info = GameInfoResponse::from_board("g1", game.board());
        assert_eq!(info.width, 3);
        assert_eq!(info.height, 2);
        assert_eq!(info.field, vec![vec![' ', '1', '0'], vec![' ', '1', '0']]);

        let value = serde_json::to_value(Response::GameInfo(info)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "game_info",
                "game_id": "g1",
                "width": 3,
                "height": 2,
                "mines_count": 1,
                "completed": false,
                "field": [[" ", "1", "0"], [" ", "1", "0"]],
            })
        );
    }

    #[test]
    fn error_response_shape() {
        let value = serde_json::to_value(Response::Error(ErrorResponse::new(404, "gone"))).unwrap();
        assert_eq!(
            value,
            json!({"type": "error", "status": 404, "error": "gone"})
        );
    }
}
