//! Picture Rank - pairwise Elo ranking
//!
//! This crate ranks a set of items (pictures in a directory, by default)
//! from repeated head-to-head comparisons. It provides the rating store,
//! Elo updates, random pair selection, the leaderboard, and the
//! persistence and enumeration collaborators around them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod prompt;
pub mod rating;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{RankResult, RankingError, Result};
pub use types::*;

// Re-export key components
pub use catalog::PictureCatalog;
pub use rating::{EloUpdater, PairSelector, RatingSnapshot, RatingStore};
pub use session::RankingSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
