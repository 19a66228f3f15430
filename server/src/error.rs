//! Request-terminating errors and their HTTP responses

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use shared::GuessError;

/// Every way a guess request can fail. Each variant maps to one status code
/// and a fixed plain-text body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Loading an existing game failed: missing key, unreadable record or
    /// backend failure.
    #[error("Error retrieving game with id: {id}")]
    Storage { id: String },

    /// Writing the updated game back to the store failed.
    #[error("Error saving game with id: {id}")]
    Persist { id: String },

    /// The request carried no `guess` parameter.
    #[error("No guess provided. Use '?guess=123' to provide the guess")]
    MissingGuess,

    /// The guess was not exactly three decimal digits.
    #[error("Guess has to be 3 numbers, e.g., '123'. The numbers have to be between 0-4. You can only use each number once.")]
    MalformedGuess,

    /// The guess repeated a digit.
    #[error("You can only use each number once.")]
    DuplicateDigits,
}

impl GameError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::Storage { .. } | GameError::Persist { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GameError::MissingGuess | GameError::MalformedGuess | GameError::DuplicateDigits => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<GuessError> for GameError {
    fn from(err: GuessError) -> Self {
        match err {
            GuessError::Duplicate => GameError::DuplicateDigits,
            GuessError::Malformed => GameError::MalformedGuess,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let id = "abc".to_string();
        assert_eq!(
            GameError::Storage { id: id.clone() }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GameError::Persist { id }.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(GameError::MissingGuess.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GameError::MalformedGuess.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GameError::DuplicateDigits.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_message_names_id() {
        let err = GameError::Storage {
            id: "garbage-id".to_string(),
        };
        assert_eq!(err.to_string(), "Error retrieving game with id: garbage-id");
    }

    #[test]
    fn test_guess_error_conversion() {
        assert_eq!(
            GameError::from(GuessError::Duplicate),
            GameError::DuplicateDigits
        );
        assert_eq!(
            GameError::from(GuessError::Malformed),
            GameError::MalformedGuess
        );
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = GameError::DuplicateDigits.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain"
        );
    }
}
