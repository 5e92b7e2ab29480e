//! Configuration management for the picture-rank tool
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{
    parse_extensions, validate_config, AppConfig, CatalogSettings, ConfigOverrides,
    ServiceSettings, SessionSettings,
};
pub use rating::RatingConfig;
