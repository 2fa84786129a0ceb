use std::time::Duration;

use sapper_core::{Board, Game};
use sapper_protocol::{GameInfoResponse, GameTurnRequest, NewGameRequest, Request, Response};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::session::{GameId, SessionStore};

/// Creates games and applies turns, translating failures into wire errors.
#[derive(Debug)]
pub struct GameService {
    sessions: SessionStore,
}

impl GameService {
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            sessions: SessionStore::new(session_ttl),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn new_game(&self, request: &NewGameRequest) -> Result<GameInfoResponse> {
        let board = sapper_core::generate(request.height, request.width, request.mines_count)?;
        Ok(self.start_game(board))
    }

    /// Registers an already generated board as a new game.
    pub fn start_game(&self, board: Board) -> GameInfoResponse {
        let id = Uuid::new_v4();
        let info = GameInfoResponse::from_board(id.to_string(), &board);
        log::info!(
            "New game {}: {}x{} with {} mines",
            id,
            board.height(),
            board.width(),
            board.mine_count()
        );
        self.sessions.insert(id, Game::new(board));
        info
    }

    pub fn turn(&self, request: &GameTurnRequest) -> Result<GameInfoResponse> {
        let id = parse_game_id(&request.game_id)?;

        self.sessions.with_game(id, |game| {
            if game.is_completed() {
                return Err(ApiError::GameCompleted(id.to_string()));
            }

            let status = game.open(request.row, request.col)?;
            log::info!(
                "Game {}: opened ({}, {}), status: {:?}",
                id,
                request.row,
                request.col,
                status
            );
            Ok(GameInfoResponse::from_board(id.to_string(), game.board()))
        })
    }

    pub fn handle(&self, request: &Request) -> Response {
        let result = match request {
            Request::New(request) => self.new_game(request),
            Request::Turn(request) => self.turn(request),
        };

        match result {
            Ok(info) => Response::GameInfo(info),
            Err(error) => self.reject(error),
        }
    }

    /// Decodes and handles one wire line.
    pub fn handle_line(&self, line: &str) -> Response {
        match Request::from_json(line) {
            Ok(request) => self.handle(&request),
            Err(error) => self.reject(ApiError::MalformedRequest(error.to_string())),
        }
    }

    /// Logs a failed request and turns it into an error response.
    pub fn reject(&self, error: ApiError) -> Response {
        log::warn!("Request rejected: {}", error);
        Response::Error(error.into())
    }
}

fn parse_game_id(game_id: &str) -> Result<GameId> {
    Uuid::parse_str(game_id).map_err(|_| ApiError::SessionNotFound(game_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_id_is_not_found() {
        assert_eq!(
            parse_game_id("nope"),
            Err(ApiError::SessionNotFound("nope".into()))
        );
    }

    #[test]
    fn malformed_line_is_a_bad_request() {
        let service = GameService::new(Duration::from_secs(60));

        let Response::Error(error) = service.handle_line("{\"type\":\"new\"") else {
            panic!("expected an error response");
        };
        assert_eq!(error.status, 400);
        assert!(error.error.starts_with("Malformed request"));
    }
}
