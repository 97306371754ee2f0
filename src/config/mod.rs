//! Settings and user-data management
//!
//! Data models with their defaults and ranges, the reconciler that folds
//! untrusted partial updates into fully-valid objects, and the manager that
//! loads/saves through the storage boundary with defaults on anything
//! missing or corrupt.

pub mod manager;
pub mod models;
pub mod reconcile;

pub use manager::ConfigManager;
pub use models::{BackgroundType, MobileLayout, Settings, UserData};
pub use reconcile::{reconcile_settings, sanitize_user_data};
