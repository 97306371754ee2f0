//! Error types for `launchdeck`
//!
//! This module defines all error types used throughout the crate,
//! providing clear error messages and proper error propagation.
//!
//! Error variants use `#[source]` to preserve error chains for better
//! observability and debugging.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `launchdeck`
#[derive(Debug, Error)]
pub enum LaunchdeckError {
    /// A user-supplied field failed validation (bad name, URL, icon, tag)
    ///
    /// The message is user-facing and names the offending field. The
    /// operation that produced it made no state change.
    #[error("{0}")]
    Validation(String),

    /// An imported backup payload is not a JSON object at all
    #[error("Invalid backup file")]
    InvalidBackup,

    /// An imported backup parses but carries neither settings nor user data
    #[error("Backup contains no usable data")]
    MissingBackupData,

    /// Catalog endpoint unreachable or returned garbage
    ///
    /// Preserves the underlying error source for full error chain transparency
    #[error("Catalog fetch failed: {0}")]
    FetchFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Persistence medium inaccessible; operations proceed in-memory only
    ///
    /// Preserves the underlying error source for full error chain transparency
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Page-title lookup failed
    ///
    /// Preserves the underlying error source for full error chain transparency
    #[error("Title lookup failed: {0}")]
    TitleLookupFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for `launchdeck` operations
pub type Result<T> = std::result::Result<T, LaunchdeckError>;

/// Convert an error to a user-friendly message
///
/// Takes a [`LaunchdeckError`] and returns a message suitable for a
/// status line or dialog. Validation messages already are user-facing
/// and pass through unchanged.
pub fn get_user_friendly_error(error: &LaunchdeckError) -> String {
    match error {
        LaunchdeckError::Validation(message) => message.clone(),
        LaunchdeckError::InvalidBackup => {
            "The selected file is not a launchdeck backup.\n\n\
             Choose a JSON file exported from the backup screen."
                .to_string()
        }
        LaunchdeckError::MissingBackupData => {
            "The backup file contains neither settings nor app data.\n\n\
             Nothing was imported and your current data is unchanged."
                .to_string()
        }
        LaunchdeckError::FetchFailed(e) => {
            format!(
                "The app catalog could not be loaded:\n\n{e}\n\n\
                 Your custom apps keep working; catalog tiles will \
                 reappear once the catalog is reachable."
            )
        }
        LaunchdeckError::StorageUnavailable(e) => {
            format!(
                "Changes could not be saved to disk:\n\n{e}\n\n\
                 Everything keeps working for this session, but changes \
                 will be lost when the app closes."
            )
        }
        LaunchdeckError::TitleLookupFailed(e) => {
            format!(
                "The page title could not be fetched:\n\n{e}\n\n\
                 Enter a name for the app manually."
            )
        }
        LaunchdeckError::Io(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        LaunchdeckError::Json(e) => {
            format!("The file could not be parsed as JSON:\n\n{e}")
        }
    }
}
