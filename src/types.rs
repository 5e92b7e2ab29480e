//! Common types used throughout the ranking engine

use serde::{Deserialize, Serialize};

/// Opaque identifier of a ranked item (a file name for pictures)
pub type ItemId = String;

/// Numeric strength estimate of an item
pub type Rating = f64;

/// Rating record held by the store for every tracked item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub rating: Rating,
    /// Comparisons applied to this item during the current session
    pub comparisons: u64,
}

impl RatingEntry {
    /// Create a fresh entry with no comparisons yet
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            comparisons: 0,
        }
    }

    /// Replace the rating and count the comparison that produced it
    pub fn record(&mut self, rating: Rating) {
        self.rating = rating;
        self.comparisons += 1;
    }
}

/// Decision collected by a presentation layer for one shown pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// The item in the first slot is preferred
    First,
    /// The item in the second slot is preferred
    Second,
    /// Tie, or the user skipped the pair
    Draw,
}

impl Choice {
    /// Outcome value relative to the first item
    pub fn outcome(self) -> f64 {
        match self {
            Choice::First => 1.0,
            Choice::Second => 0.0,
            Choice::Draw => 0.5,
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::First => write!(f, "First"),
            Choice::Second => write!(f, "Second"),
            Choice::Draw => write!(f, "Draw"),
        }
    }
}

/// Rating movement of a single item caused by one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub item_id: ItemId,
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    /// Signed difference between the new and old rating
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// Result of applying one comparison outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    /// Expected score of the first item before the update
    pub expected: f64,
    pub outcome: f64,
    pub first: RatingChange,
    pub second: RatingChange,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position in the ranking
    pub position: usize,
    pub item_id: ItemId,
    pub rating: Rating,
}
