//! Picture enumeration
//!
//! Lists the rankable files directly inside a directory. Only file names are
//! returned; they double as the item identifiers of the rating store.

use crate::error::{RankingError, Result};
use crate::types::ItemId;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A directory of pictures filtered by file extension
#[derive(Debug, Clone)]
pub struct PictureCatalog {
    directory: PathBuf,
    extensions: Vec<String>,
}

impl PictureCatalog {
    pub fn new(directory: impl Into<PathBuf>, extensions: &[String]) -> Self {
        Self {
            directory: directory.into(),
            extensions: extensions.iter().map(|ext| ext.to_lowercase()).collect(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of an item inside the catalog directory
    pub fn path(&self, item_id: &str) -> PathBuf {
        self.directory.join(item_id)
    }

    /// Whether a file name carries one of the accepted extensions
    pub fn accepts(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Names of all matching files directly inside the directory
    pub fn scan(&self) -> Result<BTreeSet<ItemId>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| RankingError::CatalogError {
            message: format!("Cannot read directory {}: {}", self.directory.display(), e),
        })?;

        let mut items = BTreeSet::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", self.directory.display(), e);
                    continue;
                }
            };

            if !entry.path().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
                continue;
            };

            if self.accepts(&name) {
                items.insert(name);
            }
        }

        debug!(
            "Found {} pictures in {}",
            items.len(),
            self.directory.display()
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogSettings;

    fn catalog(directory: &Path) -> PictureCatalog {
        PictureCatalog::new(directory, &CatalogSettings::default().extensions)
    }

    #[test]
    fn test_accepts_extensions_case_insensitively() {
        let catalog = catalog(Path::new("."));
        assert!(catalog.accepts("a.jpg"));
        assert!(catalog.accepts("B.JPEG"));
        assert!(catalog.accepts("anim.Gif"));
        assert!(catalog.accepts("shot.2015.png"));
        assert!(!catalog.accepts("notes.txt"));
        assert!(!catalog.accepts("picture-rank.json"));
        assert!(!catalog.accepts("jpg"));
    }

    #[test]
    fn test_scan_lists_matching_top_level_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.PNG", "readme.txt", "picture-rank.json"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();
        fs::write(dir.path().join("nested.jpg").join("c.jpg"), b"x").unwrap();

        let items = catalog(dir.path()).scan().unwrap();
        let names: Vec<&str> = items.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["a.jpg", "b.PNG"]);
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = catalog(&dir.path().join("missing")).scan().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RankingError>(),
            Some(RankingError::CatalogError { .. })
        ));
    }

    #[test]
    fn test_path_joins_directory() {
        let catalog = catalog(Path::new("/pictures"));
        assert_eq!(catalog.path("a.jpg"), PathBuf::from("/pictures/a.jpg"));
    }
}
