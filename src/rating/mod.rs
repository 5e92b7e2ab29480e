//! Pairwise comparison ranking
//!
//! This module provides the rating store, Elo updates, random pair
//! selection, the leaderboard, and rating persistence.

pub mod elo;
pub mod leaderboard;
pub mod pairing;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use elo::EloUpdater;
pub use leaderboard::best;
pub use pairing::PairSelector;
pub use storage::{InMemoryRatingStorage, JsonFileStorage, RatingPersistence};
pub use store::{RatingSnapshot, RatingStore};
