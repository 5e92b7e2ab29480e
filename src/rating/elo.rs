//! Elo rating updates for pairwise comparisons
//!
//! This module applies a single comparison outcome to two items of a
//! [`RatingStore`]. The expected score comes from the skillratings crate;
//! the update itself accepts any fractional outcome in `[0.0, 1.0]`, which
//! the crate's win/draw/loss API cannot express.

use crate::config::RatingConfig;
use crate::error::{RankResult, RankingError};
use crate::rating::store::RatingStore;
use crate::types::{Rating, RatingChange, RatingUpdate};
use skillratings::elo::EloRating;
use tracing::debug;

/// Applies Elo updates with a fixed K-factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EloUpdater {
    k_factor: f64,
}

impl Default for EloUpdater {
    fn default() -> Self {
        Self { k_factor: 20.0 }
    }
}

impl EloUpdater {
    /// Create an updater; the K-factor must be positive and finite
    pub fn new(k_factor: f64) -> RankResult<Self> {
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(RankingError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", k_factor),
            });
        }

        Ok(Self { k_factor })
    }

    /// Create an updater from the rating configuration
    pub fn from_config(config: &RatingConfig) -> RankResult<Self> {
        Self::new(config.k_factor)
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    /// Probability that an item rated `first` beats one rated `second`
    pub fn expected_score(first: Rating, second: Rating) -> f64 {
        let (expected_first, _expected_second) = skillratings::elo::expected_score(
            &EloRating { rating: first },
            &EloRating { rating: second },
        );
        expected_first
    }

    /// Apply one comparison outcome, relative to `first`.
    ///
    /// `1.0` means `first` was preferred, `0.0` means `second` was, `0.5` is a
    /// draw. Both ratings move by the same amount in opposite directions, so
    /// the sum of all ratings in the store never changes.
    ///
    /// Once two ratings are more than roughly 6400 points apart the expected
    /// score rounds to exactly 0.0 or 1.0 in `f64`, so the favourite winning
    /// leaves both ratings unchanged.
    pub fn update(
        &self,
        store: &mut RatingStore,
        first: &str,
        second: &str,
        outcome: f64,
    ) -> RankResult<RatingUpdate> {
        if !(0.0..=1.0).contains(&outcome) {
            return Err(RankingError::InvalidOutcome { outcome });
        }

        let first_rating = store.get(first)?;
        let second_rating = store.get(second)?;

        if first == second {
            return Err(RankingError::SelfComparison {
                item_id: first.to_string(),
            });
        }

        let expected = Self::expected_score(first_rating, second_rating);
        let delta = self.k_factor * (outcome - expected);

        let new_first = first_rating + delta;
        let new_second = second_rating - delta;

        store.record(first, new_first)?;
        store.record(second, new_second)?;

        debug!(
            "Compared {} vs {} (outcome {}, expected {:.4}): {:.2} -> {:.2}, {:.2} -> {:.2}",
            first, second, outcome, expected, first_rating, new_first, second_rating, new_second
        );

        Ok(RatingUpdate {
            expected,
            outcome,
            first: RatingChange {
                item_id: first.to_string(),
                old_rating: first_rating,
                new_rating: new_first,
            },
            second: RatingChange {
                item_id: second.to_string(),
                old_rating: second_rating,
                new_rating: new_second,
            },
        })
    }
}
