//! Rating system configuration

use crate::error::{RankResult, RankingError};
use serde::{Deserialize, Serialize};

/// Elo parameters shared by the store and the updater
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assigned to items without history
    pub default_rating: f64,
    /// Sensitivity of a single comparison
    pub k_factor: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: 1200.0,
            k_factor: 20.0,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> RankResult<()> {
        if !self.default_rating.is_finite() {
            return Err(RankingError::ConfigurationError {
                message: format!("Default rating must be finite, got {}", self.default_rating),
            });
        }

        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(RankingError::ConfigurationError {
                message: format!("K-factor must be positive, got {}", self.k_factor),
            });
        }

        Ok(())
    }
}
