use std::time::Duration;

use sapper_core::{Board, GameError};
use sapper_protocol::{GameInfoResponse, GameTurnRequest, NewGameRequest, Request, Response};
use sapper_server::{ApiError, GameService};

fn service() -> GameService {
    GameService::new(Duration::from_secs(300))
}

fn turn(game_id: &str, row: i32, col: i32) -> GameTurnRequest {
    GameTurnRequest {
        game_id: game_id.to_string(),
        col,
        row,
    }
}

fn field_rows(info: &GameInfoResponse) -> Vec<String> {
    info.field.iter().map(|row| row.iter().collect()).collect()
}

#[test]
fn new_game_starts_hidden() {
    let service = service();
    let info = service
        .new_game(&NewGameRequest {
            width: 8,
            height: 5,
            mines_count: 7,
        })
        .unwrap();

    assert_eq!((info.height, info.width, info.mines_count), (5, 8, 7));
    assert!(!info.completed);
    assert_eq!(info.field.len(), 5);
    assert!(info.field.iter().all(|row| row.len() == 8));
    assert!(info.field.iter().flatten().all(|&symbol| symbol == ' '));
    assert_eq!(service.sessions().len(), 1);
}

#[test]
fn new_game_rejects_bad_parameters() {
    let service = service();

    let narrow = NewGameRequest {
        width: 10,
        height: 1,
        mines_count: 5,
    };
    assert_eq!(
        service.new_game(&narrow),
        Err(ApiError::Game(GameError::InvalidDimension))
    );

    let packed = NewGameRequest {
        width: 5,
        height: 5,
        mines_count: 25,
    };
    assert_eq!(
        service.new_game(&packed),
        Err(ApiError::Game(GameError::InvalidMineCount { max: 24 }))
    );
    assert!(service.sessions().is_empty());
}

#[test]
fn turns_play_out_to_a_win() {
    let service = service();
    let board = Board::from_mine_coords(2, 2, &[(0, 0)]).unwrap();
    let game_id = service.start_game(board).game_id;

    let info = service.turn(&turn(&game_id, 1, 1)).unwrap();
    assert!(!info.completed);
    assert_eq!(field_rows(&info), vec!["  ", " 1"]);

    service.turn(&turn(&game_id, 0, 1)).unwrap();
    let info = service.turn(&turn(&game_id, 1, 0)).unwrap();
    assert!(info.completed);
    assert_eq!(field_rows(&info), vec!["M1", "11"]);

    assert_eq!(
        service.turn(&turn(&game_id, 0, 0)),
        Err(ApiError::GameCompleted(game_id.clone()))
    );
}

#[test]
fn mine_ends_the_game() {
    let service = service();
    let board = Board::from_mine_coords(3, 3, &[(1, 1), (2, 2)]).unwrap();
    let game_id = service.start_game(board).game_id;

    let info = service.turn(&turn(&game_id, 1, 1)).unwrap();
    assert!(info.completed);
    assert_eq!(field_rows(&info), vec!["   ", " X ", "   "]);
}

#[test]
fn rejected_turns_leave_the_board_alone() {
    let service = service();
    let board = Board::from_mine_coords(3, 3, &[(0, 0), (2, 2)]).unwrap();
    let game_id = service.start_game(board).game_id;

    let first = service.turn(&turn(&game_id, 2, 0)).unwrap();
    assert_eq!(field_rows(&first), vec!["   ", "12 ", "01 "]);

    assert_eq!(
        service.turn(&turn(&game_id, 2, 0)),
        Err(ApiError::Game(GameError::AlreadyRevealed))
    );
    assert_eq!(
        service.turn(&turn(&game_id, 3, 0)),
        Err(ApiError::Game(GameError::OutOfBounds))
    );

    let next = service.turn(&turn(&game_id, 0, 1)).unwrap();
    assert!(!next.completed);
    assert_eq!(field_rows(&next), vec![" 1 ", "12 ", "01 "]);
}

#[test]
fn unknown_and_expired_games() {
    let service = service();
    let missing = "6f1c2a4e-8d3b-4b7a-9c1d-2e3f4a5b6c7d";
    assert_eq!(
        service.turn(&turn(missing, 0, 0)),
        Err(ApiError::SessionNotFound(missing.to_string()))
    );

    let service = GameService::new(Duration::ZERO);
    let board = Board::from_mine_coords(3, 3, &[(0, 0)]).unwrap();
    let game_id = service.start_game(board).game_id;
    assert_eq!(
        service.turn(&turn(&game_id, 2, 2)),
        Err(ApiError::SessionExpired(game_id.clone()))
    );
    assert!(service.sessions().is_empty());
}

#[test]
fn huge_session_ttl_still_plays() {
    let service = GameService::new(Duration::from_secs(u64::MAX));
    let board = Board::from_mine_coords(3, 3, &[(0, 0)]).unwrap();
    let game_id = service.start_game(board).game_id;

    let info = service.turn(&turn(&game_id, 2, 2)).unwrap();
    assert!(info.completed);
    assert_eq!(service.sessions().purge_expired(), 0);
}

#[test]
fn handle_maps_errors_to_responses() {
    let service = service();

    let response = service.handle(&Request::New(NewGameRequest {
        width: 31,
        height: 10,
        mines_count: 5,
    }));
    let Response::Error(error) = response else {
        panic!("expected an error response");
    };
    assert_eq!(error.status, 400);
    assert_eq!(error.error, "Height and width must be between 2 and 30");

    let response = service.handle_line(r#"{"type":"turn","game_id":"x","col":0,"row":0}"#);
    let Response::Error(error) = response else {
        panic!("expected an error response");
    };
    assert_eq!(error.status, 404);
}
