//! In-memory storage
//!
//! Test backend: everything works for the session, nothing survives it.
//! Its write-failure switch drives the warn-and-continue persistence
//! tests.

use crate::error::{LaunchdeckError, Result, StringError};
use crate::storage::StorageBackend;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Storage backend holding values in a map
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail with `StorageUnavailable`
    ///
    /// Lets tests exercise the warn-and-continue persistence path.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LaunchdeckError::StorageUnavailable(StringError::new(
                "memory storage configured to fail writes",
            )));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load("key").unwrap().is_none());
        storage.save("key", "value").unwrap();
        assert_eq!(storage.load("key").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_fail_writes() {
        let storage = MemoryStorage::new();
        storage.fail_writes(true);
        let result = storage.save("key", "value");
        assert!(matches!(
            result,
            Err(LaunchdeckError::StorageUnavailable(_))
        ));
        assert!(storage.load("key").unwrap().is_none());
    }
}
