//! Rating persistence interface and implementations
//!
//! This module defines how ratings survive between sessions: a JSON object
//! mapping item names to ratings, stored next to the ranked pictures, plus
//! an in-memory backend for tests and embedding.

use crate::error::{RankingError, Result};
use crate::rating::store::RatingSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Trait for loading and saving rating snapshots
pub trait RatingPersistence: Send + Sync {
    /// Load the last saved ratings; an absent source yields an empty snapshot
    fn load(&self) -> Result<RatingSnapshot>;

    /// Replace the saved ratings with the given snapshot
    fn save(&self, snapshot: &RatingSnapshot) -> Result<()>;
}

/// Ratings stored as a JSON object `{ "item": rating, ... }` in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the snapshot is written to before being renamed into place
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RatingPersistence for JsonFileStorage {
    fn load(&self) -> Result<RatingSnapshot> {
        if !self.path.exists() {
            debug!("No ratings file at {}, starting fresh", self.path.display());
            return Ok(RatingSnapshot::new());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| RankingError::StorageError {
                message: format!("Failed to read {}: {}", self.path.display(), e),
            })?;

        let snapshot: RatingSnapshot =
            serde_json::from_str(&contents).map_err(|e| RankingError::StorageError {
                message: format!("Malformed ratings file {}: {}", self.path.display(), e),
            })?;

        info!(
            "Loaded {} ratings from {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &RatingSnapshot) -> Result<()> {
        if snapshot.is_empty() {
            debug!("Nothing to save to {}", self.path.display());
            return Ok(());
        }

        // JSON has no representation for NaN or infinity
        if let Some((item_id, rating)) = snapshot.iter().find(|(_, r)| !r.is_finite()) {
            return Err(RankingError::StorageError {
                message: format!("Cannot save non-finite rating {} for {}", rating, item_id),
            }
            .into());
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| {
            RankingError::StorageError {
                message: format!("Failed to serialize ratings: {}", e),
            }
        })?;

        let staging = self.staging_path();
        fs::write(&staging, json).map_err(|e| RankingError::StorageError {
            message: format!("Failed to write {}: {}", staging.display(), e),
        })?;
        fs::rename(&staging, &self.path).map_err(|e| RankingError::StorageError {
            message: format!(
                "Failed to move {} to {}: {}",
                staging.display(),
                self.path.display(),
                e
            ),
        })?;

        info!("Saved {} ratings to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

/// In-memory rating persistence
#[derive(Debug, Default)]
pub struct InMemoryRatingStorage {
    ratings: RwLock<RatingSnapshot>,
    save_calls: RwLock<usize>,
}

impl InMemoryRatingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds the given ratings
    pub fn with_ratings(ratings: RatingSnapshot) -> Self {
        Self {
            ratings: RwLock::new(ratings),
            save_calls: RwLock::new(0),
        }
    }

    /// Number of saves performed so far
    pub fn save_count(&self) -> usize {
        self.save_calls.read().map(|calls| *calls).unwrap_or_default()
    }

    /// Ratings as last saved
    pub fn saved(&self) -> RatingSnapshot {
        self.ratings
            .read()
            .map(|ratings| ratings.clone())
            .unwrap_or_default()
    }
}

impl RatingPersistence for InMemoryRatingStorage {
    fn load(&self) -> Result<RatingSnapshot> {
        let ratings = self
            .ratings
            .read()
            .map_err(|_| RankingError::StorageError {
                message: "Failed to acquire ratings read lock".to_string(),
            })?;

        Ok(ratings.clone())
    }

    fn save(&self, snapshot: &RatingSnapshot) -> Result<()> {
        let mut ratings = self
            .ratings
            .write()
            .map_err(|_| RankingError::StorageError {
                message: "Failed to acquire ratings write lock".to_string(),
            })?;
        *ratings = snapshot.clone();
        drop(ratings);

        if let Ok(mut calls) = self.save_calls.write() {
            *calls += 1;
        }

        Ok(())
    }
}

impl<P: RatingPersistence + ?Sized> RatingPersistence for std::sync::Arc<P> {
    fn load(&self) -> Result<RatingSnapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &RatingSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, f64)]) -> RatingSnapshot {
        pairs
            .iter()
            .map(|(id, rating)| (id.to_string(), *rating))
            .collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("picture-rank.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_json_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("picture-rank.json"));
        let ratings = snapshot(&[("b.jpg", 1190.0), ("a.jpg", 1209.123456789)]);

        storage.save(&ratings).unwrap();
        assert_eq!(storage.load().unwrap(), ratings);
        assert!(!storage.staging_path().exists());

        // Keys are written in sorted order
        let raw = fs::read_to_string(storage.path()).unwrap();
        assert!(raw.find("a.jpg").unwrap() < raw.find("b.jpg").unwrap());
    }

    #[test]
    fn test_reads_integer_ratings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture-rank.json");
        fs::write(&path, r#"{"a.jpg": 1200, "b.png": 1234.5}"#).unwrap();

        let loaded = JsonFileStorage::new(&path).load().unwrap();
        assert_eq!(loaded, snapshot(&[("a.jpg", 1200.0), ("b.png", 1234.5)]));
    }

    #[test]
    fn test_malformed_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture-rank.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonFileStorage::new(&path).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::StorageError { .. })
        ));
    }

    #[test]
    fn test_non_finite_rating_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("picture-rank.json"));
        let good = snapshot(&[("a.jpg", 1210.0), ("b.jpg", 1190.0)]);
        storage.save(&good).unwrap();

        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut ratings = good.clone();
            ratings.insert("a.jpg".to_string(), bad);

            let err = storage.save(&ratings).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<RankingError>(),
                Some(RankingError::StorageError { .. })
            ));
            assert!(!storage.staging_path().exists());
        }

        // The previous file is still intact and loadable
        assert_eq!(storage.load().unwrap(), good);
    }

    #[test]
    fn test_empty_snapshot_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("picture-rank.json"));

        storage.save(&RatingSnapshot::new()).unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_in_memory_storage() {
        let storage = InMemoryRatingStorage::with_ratings(snapshot(&[("a", 1300.0)]));
        assert_eq!(storage.load().unwrap(), snapshot(&[("a", 1300.0)]));
        assert_eq!(storage.save_count(), 0);

        storage.save(&snapshot(&[("b", 1100.0)])).unwrap();
        assert_eq!(storage.saved(), snapshot(&[("b", 1100.0)]));
        assert_eq!(storage.save_count(), 1);
    }
}
