//! File-backed storage
//!
//! Maps each storage key to a JSON file in the data directory. Writes go
//! through a temp file followed by an atomic persist so a crash mid-write
//! never leaves a truncated file behind.

use crate::error::{LaunchdeckError, Result};
use crate::storage::StorageBackend;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Storage backend writing one JSON file per key
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory for launchdeck
    ///
    /// Falls back to the current directory when the platform reports no
    /// data directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("launchdeck")
    }

    /// The directory this backend writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LaunchdeckError::StorageUnavailable(Box::new(e))),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| LaunchdeckError::StorageUnavailable(Box::new(e)))?;

        // Atomic write: temp file in the same directory, then persist
        let mut temp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| LaunchdeckError::StorageUnavailable(Box::new(e)))?;
        temp.write_all(value.as_bytes())
            .map_err(|e| LaunchdeckError::StorageUnavailable(Box::new(e)))?;
        temp.persist(self.path_for(key))
            .map_err(|e| LaunchdeckError::StorageUnavailable(Box::new(e)))?;

        debug!("Saved {} bytes under '{}'", value.len(), key);
        Ok(())
    }
}
