//! # Bulls and Cows Server Library
//!
//! This library provides the HTTP game server for a numeric Bulls and Cows
//! game. A player guesses a hidden ordered selection of three distinct digits
//! from 0-4 and each request answers with how many digits are in the right
//! place (bulls) and how many are in the solution but elsewhere (cows).
//!
//! ## Request Model
//!
//! Every HTTP request is handled on its own. There is no in-process state
//! shared between requests apart from the store handle; a game lives only as
//! a record in the key-value store, keyed by its id.
//!
//! - `?guess=123` with no `id` starts a new game and scores the guess
//! - `?id=<game>&guess=123` continues an existing game
//!
//! Concurrent requests for the same game race with last-write-wins
//! semantics; the server adds no locking around the read-modify-write.
//!
//! ## Module Organization
//!
//! ### Query Module (`query`)
//! Extracts case-insensitive, form-decoded parameters from the request URI.
//!
//! ### Store Module (`store`)
//! The key-value store abstraction and its memory and file backends.
//!
//! ### Game Module (`game`)
//! The guess evaluator: resolves or creates the game, validates the guess,
//! scores it and persists the updated record.
//!
//! ### Error Module (`error`)
//! The request error taxonomy and its mapping to HTTP responses.
//!
//! ### Network Module (`network`)
//! The axum router and listener.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network;
//! use server::store::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     network::serve("127.0.0.1:3000", Arc::new(MemoryStore::new())).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod game;
pub mod network;
pub mod query;
pub mod store;
