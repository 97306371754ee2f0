//! Persistence boundary
//!
//! A narrow key-value contract over whatever medium holds persisted state.
//! The core never touches the filesystem directly; it is handed a backend
//! at startup, which keeps everything above this line testable without one.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Key-value persistence keyed by fixed string identifiers
///
/// Read failures are treated as "use defaults" by callers and write
/// failures as warnings; neither is ever fatal to the engine.
pub trait StorageBackend: Send + Sync {
    /// Load the value stored under `key`; `Ok(None)` when absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;
}
