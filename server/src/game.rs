//! Guess evaluation: one request in, one response out.
//!
//! A request without an `id` starts a new game; a request with one continues
//! the stored game. Either way the `guess` parameter is validated, scored
//! against the solution and the updated record is written back before the
//! response is built. All state between requests lives in the store.

use crate::error::GameError;
use crate::query::get_url_parameter;
use crate::store::KeyValueStore;
use log::{debug, error, info};
use shared::{GameState, Guess, GuessResponse};
use uuid::Uuid;

/// Handles one request URI against `store`.
///
/// Every log line is tagged with a fresh request id.
pub async fn handle_request(
    store: &dyn KeyValueStore,
    uri: &str,
) -> Result<GuessResponse, GameError> {
    let request_id = Uuid::new_v4().to_string();
    evaluate(store, uri, &request_id).await
}

async fn evaluate(
    store: &dyn KeyValueStore,
    uri: &str,
    request_id: &str,
) -> Result<GuessResponse, GameError> {
    let mut game = match get_url_parameter("id", uri) {
        None => start_game(store, request_id).await?,
        Some(id) => {
            let game = load_game(store, &id, request_id).await?;
            info!("[{}] Continuing game: {}", request_id, game.id);
            game
        }
    };

    let guess = match get_url_parameter("guess", uri) {
        Some(raw) => Guess::parse(&raw).map_err(|e| {
            error!("[{}] Rejected guess {:?}: {}", request_id, raw, e);
            GameError::from(e)
        })?,
        None => {
            error!("[{}] No guess provided", request_id);
            return Err(GameError::MissingGuess);
        }
    };
    info!("[{}] Guess is: {}", request_id, guess);

    let score = game.record_guess(&guess);
    info!(
        "[{}] Bulls: {}, Cows: {}",
        request_id, score.bulls, score.cows
    );
    if score.is_solved() {
        info!(
            "[{}] Solved game: {} in {} guesses",
            request_id, game.id, game.guesses
        );
    }

    save_game(store, &game, request_id).await?;
    debug!("[{}] Saved game state: {:?}", request_id, game);

    Ok(GuessResponse::new(&game, score))
}

/// Creates and persists a game with a fresh id and random solution.
async fn start_game(store: &dyn KeyValueStore, request_id: &str) -> Result<GameState, GameError> {
    let id = Uuid::new_v4().to_string();
    info!("[{}] Starting new game: {}", request_id, id);

    let game = GameState::new(id, &mut rand::thread_rng());
    save_game(store, &game, request_id).await?;
    debug!("[{}] Game status: {:?}", request_id, game);

    Ok(game)
}

/// Fetches a stored game. Any failure, including a missing key or a record
/// that does not describe a valid game, is reported as `Storage`.
async fn load_game(
    store: &dyn KeyValueStore,
    id: &str,
    request_id: &str,
) -> Result<GameState, GameError> {
    let storage_error = || GameError::Storage { id: id.to_string() };

    let value = match store.get_json(id).await {
        Ok(Some(value)) => value,
        Ok(None) => {
            error!("[{}] No game stored under id {}", request_id, id);
            return Err(storage_error());
        }
        Err(e) => {
            error!("[{}] {}", request_id, e);
            return Err(storage_error());
        }
    };

    let game: GameState = serde_json::from_value(value).map_err(|e| {
        error!("[{}] Stored game {} is unreadable: {}", request_id, id, e);
        storage_error()
    })?;

    if game.id != id || !game.has_valid_solution() {
        error!("[{}] Stored game {} is inconsistent", request_id, id);
        return Err(storage_error());
    }

    Ok(game)
}

async fn save_game(
    store: &dyn KeyValueStore,
    game: &GameState,
    request_id: &str,
) -> Result<(), GameError> {
    let persist_error = || GameError::Persist {
        id: game.id.clone(),
    };

    let value = serde_json::to_value(game).map_err(|e| {
        error!("[{}] Failed to encode game {}: {}", request_id, game.id, e);
        persist_error()
    })?;

    store.set_json(&game.id, &value).await.map_err(|e| {
        error!("[{}] {}", request_id, e);
        persist_error()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashSet;

    /// Store whose reads and/or writes always fail
    struct FailingStore {
        fail_reads: bool,
        inner: MemoryStore,
    }

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get_json(&self, key: &str) -> StoreResult<Option<Value>> {
            if self.fail_reads {
                return Err(StoreError::InvalidKey(key.to_string()));
            }
            self.inner.get_json(key).await
        }

        async fn set_json(&self, key: &str, _value: &Value) -> StoreResult<()> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    async fn seeded_store(id: &str, solution: [u8; 3]) -> MemoryStore {
        let store = MemoryStore::new();
        let game = GameState::with_solution(id, solution);
        store
            .set_json(id, &serde_json::to_value(&game).unwrap())
            .await
            .unwrap();
        store
    }

    async fn stored_game(store: &MemoryStore, id: &str) -> GameState {
        let value = store.get_json(id).await.unwrap().unwrap();
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_new_game_is_created_and_scored() {
        let store = MemoryStore::new();
        let response = handle_request(&store, "/?guess=012").await.unwrap();

        assert_eq!(response.guesses, 1);
        assert_eq!(store.len().await, 1);

        let game = stored_game(&store, &response.game_id).await;
        assert!(game.has_valid_solution());
        assert_eq!(game.guesses, 1);
        assert_eq!(game.solved, response.solved);

        let overlap = game
            .solution
            .iter()
            .filter(|d| [0u8, 1, 2].contains(d))
            .count();
        assert_eq!((response.bulls + response.cows) as usize, overlap);
    }

    #[tokio::test]
    async fn test_new_games_get_distinct_ids() {
        let store = MemoryStore::new();
        let mut ids = HashSet::new();
        for _ in 0..10 {
            ids.insert(handle_request(&store, "/?guess=123").await.unwrap().game_id);
        }
        assert_eq!(ids.len(), 10);
        assert_eq!(store.len().await, 10);
    }

    #[tokio::test]
    async fn test_new_game_without_guess_is_still_persisted() {
        let store = MemoryStore::new();
        let result = handle_request(&store, "/").await;

        assert_eq!(result, Err(GameError::MissingGuess));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_winning_guess() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        let response = handle_request(&store, "/?id=game-a&guess=204")
            .await
            .unwrap();

        assert_eq!(
            response,
            GuessResponse {
                cows: 0,
                bulls: 3,
                game_id: "game-a".to_string(),
                guesses: 1,
                solved: true,
            }
        );
        assert!(stored_game(&store, "game-a").await.solved);
    }

    #[tokio::test]
    async fn test_all_cows_guess() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        let response = handle_request(&store, "/?id=game-a&guess=042")
            .await
            .unwrap();

        assert_eq!(response.bulls, 0);
        assert_eq!(response.cows, 3);
        assert!(!response.solved);
        assert_eq!(response.guesses, 1);
    }

    #[tokio::test]
    async fn test_repeated_guesses_increment_count() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        for expected in 1..=4 {
            let response = handle_request(&store, "/?id=game-a&guess=013")
                .await
                .unwrap();
            assert_eq!(response.guesses, expected);
        }
        assert_eq!(stored_game(&store, "game-a").await.guesses, 4);
    }

    #[tokio::test]
    async fn test_solved_stays_solved() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        handle_request(&store, "/?id=game-a&guess=204").await.unwrap();
        let later = handle_request(&store, "/?id=game-a&guess=310").await.unwrap();

        assert!(later.solved);
        assert_eq!(later.guesses, 2);
        assert_eq!(later.bulls, 0);
    }

    #[tokio::test]
    async fn test_id_is_case_insensitive() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        let response = handle_request(&store, "/?ID=GAME-A&Guess=204").await.unwrap();
        assert_eq!(response.game_id, "game-a");
        assert!(response.solved);
    }

    #[tokio::test]
    async fn test_id_after_semicolon_starts_new_game() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        let response = handle_request(&store, "/?guess=204;id=game-a")
            .await
            .unwrap();

        assert_ne!(response.game_id, "game-a");
        assert_eq!(response.guesses, 1);
        assert_eq!(store.len().await, 2);
        assert_eq!(stored_game(&store, "game-a").await.guesses, 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_storage_error() {
        let store = MemoryStore::new();
        let result = handle_request(&store, "/?id=garbage&guess=012").await;

        assert_eq!(
            result,
            Err(GameError::Storage {
                id: "garbage".to_string()
            })
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_id_checked_before_guess() {
        let store = MemoryStore::new();
        let result = handle_request(&store, "/?id=garbage").await;
        assert!(matches!(result, Err(GameError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_unreadable_record_is_storage_error() {
        let store = MemoryStore::new();
        store
            .set_json("bad", &json!({ "id": "bad", "solution": "nope" }))
            .await
            .unwrap();
        store
            .set_json(
                "dup",
                &json!({ "id": "dup", "solution": [1, 1, 2], "guesses": 0, "solved": false }),
            )
            .await
            .unwrap();

        for id in ["bad", "dup"] {
            let result = handle_request(&store, &format!("/?id={}&guess=012", id)).await;
            assert_eq!(result, Err(GameError::Storage { id: id.to_string() }));
        }
    }

    #[tokio::test]
    async fn test_read_failure_is_storage_error() {
        let store = FailingStore {
            fail_reads: true,
            inner: MemoryStore::new(),
        };
        let result = handle_request(&store, "/?id=abc&guess=012").await;
        assert_eq!(result, Err(GameError::Storage { id: "abc".to_string() }));
    }

    #[tokio::test]
    async fn test_write_failure_is_persist_error() {
        let store = FailingStore {
            fail_reads: false,
            inner: MemoryStore::new(),
        };
        let result = handle_request(&store, "/?guess=012").await;
        assert!(matches!(result, Err(GameError::Persist { .. })));
    }

    #[tokio::test]
    async fn test_invalid_guesses_leave_game_untouched() {
        let store = seeded_store("game-a", [2, 0, 4]).await;

        let cases = [
            ("001", GameError::DuplicateDigits),
            ("abc", GameError::MalformedGuess),
            ("12", GameError::MalformedGuess),
            ("1234", GameError::MalformedGuess),
        ];
        for (guess, expected) in cases {
            let result = handle_request(&store, &format!("/?id=game-a&guess={}", guess)).await;
            assert_eq!(result, Err(expected), "guess {:?}", guess);
        }

        assert_eq!(
            handle_request(&store, "/?id=game-a").await,
            Err(GameError::MissingGuess)
        );
        assert_eq!(stored_game(&store, "game-a").await.guesses, 0);
    }

    #[tokio::test]
    async fn test_out_of_range_digits_score_nothing() {
        let store = seeded_store("game-a", [2, 0, 4]).await;
        let response = handle_request(&store, "/?id=game-a&guess=789")
            .await
            .unwrap();

        assert_eq!((response.bulls, response.cows), (0, 0));
        assert_eq!(response.guesses, 1);
    }
}
