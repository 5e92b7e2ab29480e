//! Error types for the ranking engine
//!
//! Core operations return [`RankingError`] directly so callers can match on
//! the kind. The collaborator layers (config, storage, catalog, session)
//! use the anyhow-based [`Result`] alias and convert into it with `.into()`.

/// Result type alias for the boundary layers
pub type Result<T> = anyhow::Result<T>;

/// Result type for the core ranking operations
pub type RankResult<T> = std::result::Result<T, RankingError>;

/// Error kinds surfaced by the ranking engine and its collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("Unknown item: {item_id}")]
    UnknownItem { item_id: String },

    #[error("Not enough items to compare: {count} tracked, at least 2 required")]
    InsufficientItems { count: usize },

    #[error("Invalid outcome {outcome}: must be within [0.0, 1.0]")]
    InvalidOutcome { outcome: f64 },

    #[error("Cannot compare item {item_id} with itself")]
    SelfComparison { item_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Rating storage error: {message}")]
    StorageError { message: String },

    #[error("Picture catalog error: {message}")]
    CatalogError { message: String },
}

impl RankingError {
    pub(crate) fn unknown(item_id: &str) -> Self {
        RankingError::UnknownItem {
            item_id: item_id.to_string(),
        }
    }
}
