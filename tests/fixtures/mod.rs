//! Test fixtures for integration testing

use picture_rank::config::AppConfig;
use picture_rank::RatingSnapshot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary picture directory with empty placeholder files
pub struct PictureDir {
    pub dir: TempDir,
}

impl PictureDir {
    /// Create a directory holding the given file names
    pub fn with_files(names: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for name in names {
            fs::write(dir.path().join(name), b"").expect("Failed to create picture");
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a ratings file as a previous session would have
    pub fn write_ratings(&self, ratings: &[(&str, f64)]) {
        let snapshot: RatingSnapshot = ratings
            .iter()
            .map(|(name, rating)| (name.to_string(), *rating))
            .collect();
        let json = serde_json::to_string(&snapshot).expect("Failed to serialize ratings");
        fs::write(self.ratings_path(), json).expect("Failed to write ratings file");
    }

    /// Ratings currently stored on disk
    pub fn read_ratings(&self) -> RatingSnapshot {
        let contents = fs::read_to_string(self.ratings_path()).expect("Ratings file missing");
        serde_json::from_str(&contents).expect("Malformed ratings file")
    }

    pub fn has_ratings_file(&self) -> bool {
        self.ratings_path().exists()
    }

    pub fn remove(&self, name: &str) {
        fs::remove_file(self.path().join(name)).expect("Failed to remove picture");
    }

    fn ratings_path(&self) -> std::path::PathBuf {
        self.path().join(AppConfig::default().catalog.ratings_file)
    }
}
