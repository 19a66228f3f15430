//! # Bulls and Cows Client Library
//!
//! A thin HTTP client for the game server. [`GameClient`] sends guesses and
//! remembers the game id the server assigns on the first one, so a sequence
//! of calls plays a single game.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::GameClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut game = GameClient::new("http://127.0.0.1:3000");
//!     let result = game.guess("012").await?;
//!     println!("{} bulls, {} cows", result.bulls, result.cows);
//!     Ok(())
//! }
//! ```

use log::debug;
use reqwest::StatusCode;
use shared::GuessResponse;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server rejected the guess ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

/// Plays one game against a server
pub struct GameClient {
    http: reqwest::Client,
    base_url: String,
    game_id: Option<String>,
}

impl GameClient {
    /// Starts a client that will create a new game on its first guess.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            game_id: None,
        }
    }

    /// Continues an existing game.
    pub fn resume(base_url: impl Into<String>, game_id: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.game_id = Some(game_id.into());
        client
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    /// Sends one guess and returns the server's score.
    ///
    /// The returned game id is kept for the following guesses. Non-success
    /// responses become [`ClientError::Rejected`] carrying the server's
    /// plain-text message.
    pub async fn guess(&mut self, guess: &str) -> Result<GuessResponse, ClientError> {
        let mut query = vec![("guess", guess)];
        if let Some(id) = self.game_id.as_deref() {
            query.push(("id", id));
        }

        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            return Err(ClientError::Rejected { status, message });
        }

        let result: GuessResponse = response.json().await?;
        debug!("Game {} after {} guesses", result.game_id, result.guesses);
        self.game_id = Some(result.game_id.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_has_no_game() {
        let client = GameClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
        assert_eq!(client.game_id(), None);
    }

    #[test]
    fn test_resume_keeps_game_id() {
        let client = GameClient::resume("http://localhost:3000", "abc");
        assert_eq!(client.game_id(), Some("abc"));
    }

    #[test]
    fn test_rejected_message() {
        let err = ClientError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "You can only use each number once.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server rejected the guess (400 Bad Request): You can only use each number once."
        );
    }
}
