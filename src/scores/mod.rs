//! Score persistence
//!
//! - `store`: key-value collaborator trait and an in-memory store
//! - `service`: high scores, play counts and leaderboard over the store
//! - `api`: JSON request/response handling for the score endpoints
//! - `client`: best-effort reporting of finished runs

pub mod api;
pub mod client;
pub mod leaderboard;
pub mod service;
pub mod store;

pub use client::{LocalReporter, ScoreReporter};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use service::{Identity, ScoreError, ScoreService};
pub use store::{KeyValueStore, MemoryStore, StoreError};
