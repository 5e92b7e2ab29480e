//! Main application configuration
//!
//! This module defines the configuration structures for the picture-rank
//! tool, including TOML file and environment variable loading and
//! validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub catalog: CatalogSettings,
    pub session: SessionSettings,
}

/// Process-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Which files count as rankable pictures and where ratings live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogSettings {
    /// File extensions considered pictures, matched case-insensitively
    pub extensions: Vec<String>,
    /// Name of the ratings file inside the ranked directory
    pub ratings_file: String,
}

/// Comparison session settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionSettings {
    /// Persist after every N outcomes; 0 saves only on explicit save/close
    pub autosave_every: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "gif"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            ratings_file: "picture-rank.json".to_string(),
        }
    }
}

/// Values given on the command line, applied over the loaded configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub k_factor: Option<f64>,
    pub default_rating: Option<f64>,
    pub ratings_file: Option<String>,
    pub autosave_every: Option<u64>,
}

impl ConfigOverrides {
    /// Replace every setting that has an override
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(log_level) = &self.log_level {
            config.service.log_level = log_level.clone();
        }
        if let Some(k_factor) = self.k_factor {
            config.rating.k_factor = k_factor;
        }
        if let Some(default_rating) = self.default_rating {
            config.rating.default_rating = default_rating;
        }
        if let Some(ratings_file) = &self.ratings_file {
            config.catalog.ratings_file = ratings_file.clone();
        }
        if let Some(every) = self.autosave_every {
            config.session.autosave_every = every;
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults.
    ///
    /// The result is not validated, so overrides can still repair it. Call
    /// [`validate_config`] once all layers are applied.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults.
    ///
    /// Like [`AppConfig::from_file`], this does not validate.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load from `file` (or the environment when absent), apply the
    /// overrides and validate the merged result
    pub fn load(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };

        overrides.apply(&mut config);
        validate_config(&config)?;
        Ok(config)
    }

    /// Overlay any set environment variables onto this configuration
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Ok(rating) = env::var("DEFAULT_RATING") {
            self.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", rating))?;
        }
        if let Ok(k) = env::var("K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k))?;
        }

        // Catalog settings
        if let Ok(file) = env::var("RATINGS_FILE") {
            self.catalog.ratings_file = file;
        }
        if let Ok(extensions) = env::var("IMAGE_EXTENSIONS") {
            self.catalog.extensions = parse_extensions(&extensions);
        }

        // Session settings
        if let Ok(every) = env::var("AUTOSAVE_EVERY") {
            self.session.autosave_every = every
                .parse()
                .map_err(|_| anyhow!("Invalid AUTOSAVE_EVERY value: {}", every))?;
        }

        Ok(())
    }
}

/// Split a comma-separated extension list, dropping blanks and leading dots
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;

    if config.catalog.extensions.is_empty() {
        return Err(anyhow!("At least one picture extension is required"));
    }
    if config.catalog.ratings_file.trim().is_empty() {
        return Err(anyhow!("Ratings file name cannot be empty"));
    }

    Ok(())
}
