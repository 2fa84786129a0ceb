use sapper_core::GameError;
use sapper_protocol::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("Game with id={0} does not exist")]
    SessionNotFound(String),
    #[error("Game with id={0} has expired")]
    SessionExpired(String),
    #[error("Game with id={0} is already completed")]
    GameCompleted(String),
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl ApiError {
    /// HTTP-style status code reported to clients.
    pub fn status(&self) -> u16 {
        use GameError::*;
        match self {
            Self::Game(
                InvalidDimension | InvalidMineCount { .. } | OutOfBounds | AlreadyRevealed,
            ) => 400,
            Self::Game(AlreadyEnded) => 409,
            Self::MalformedRequest(_) => 400,
            Self::SessionNotFound(_) => 404,
            Self::GameCompleted(_) => 409,
            Self::SessionExpired(_) => 410,
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(error: ApiError) -> Self {
        ErrorResponse::new(error.status(), error.to_string())
    }
}

pub type Result<T> = core::result::Result<T, ApiError>;
