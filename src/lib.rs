//! `launchdeck` - state engine for a personal launchpad shortcut gallery
//!
//! Merges a remote app catalog with user-defined custom apps into one
//! validated, uniquely-identified collection, projects it into a searchable
//! paginated view, reconciles appearance settings, and implements a
//! versioned backup import/export protocol. Presentation (tile rendering,
//! dialogs) lives outside this crate; the CLI binary is one such consumer.
//!
//! # Data flow
//!
//! raw catalog + stored user data -> [`apps::merge_collection`] ->
//! canonical collection -> [`apps::view::project`] -> paginated view.
//! [`config::reconcile_settings`] and [`backup`] operate on the persisted
//! objects and feed back into the same merge on the next recompute.

// Module declarations
pub mod apps;
pub mod backup;
pub mod catalog;
pub mod config;
pub mod error;
pub mod sanitize;
pub mod storage;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use error::{LaunchdeckError, Result};
pub use store::LaunchpadStore;
