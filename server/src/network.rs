//! HTTP layer: an axum router with a single endpoint
//!
//! Every request, whatever its method or path, is handed to the guess
//! evaluator together with its URI. Success is returned as JSON and every
//! failure as a plain-text body with the matching status code.

use crate::error::GameError;
use crate::game::handle_request;
use crate::store::KeyValueStore;
use axum::extract::State;
use axum::http::Uri;
use axum::{Json, Router};
use log::info;
use shared::GuessResponse;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Store handle shared by all requests
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Builds the router. The evaluator is installed as the fallback so it
/// answers every method on every path.
pub fn router(store: SharedStore) -> Router {
    Router::new().fallback(guess_handler).with_state(store)
}

/// Binds `addr` and serves requests until the listener fails.
pub async fn serve(addr: &str, store: SharedStore) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(store)).await
}

async fn guess_handler(
    State(store): State<SharedStore>,
    uri: Uri,
) -> Result<Json<GuessResponse>, GameError> {
    handle_request(store.as_ref(), &uri.to_string())
        .await
        .map(Json)
}
