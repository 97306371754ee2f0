//! Configuration manager for loading and saving persisted state
//!
//! Loads settings and user data through the injected storage backend.
//! Missing or corrupt entries never fail a load: raw values are parsed as
//! JSON and reconciled onto defaults, so the result is always fully valid.

use crate::apps::record::{AppOrigin, AppRecord};
use crate::config::models::{Settings, UserData};
use crate::config::reconcile::{reconcile_settings, sanitize_user_data};
use crate::error::Result;
use crate::storage::StorageBackend;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Storage key for appearance settings
pub const SETTINGS_KEY: &str = "launchdeck.settings";
/// Storage key for user data (custom apps, hidden ids, page size)
pub const USER_DATA_KEY: &str = "launchdeck.user-data";
/// Storage key for the last successfully fetched catalog payload
pub const CATALOG_CACHE_KEY: &str = "launchdeck.catalog-cache";

/// Loads and saves persisted state through a [`StorageBackend`]
pub struct ConfigManager {
    storage: Arc<dyn StorageBackend>,
}

impl ConfigManager {
    /// Create a manager over the given backend
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Read and reconcile a stored JSON value; `None` when absent or unreadable
    fn load_value(&self, key: &str) -> Option<Value> {
        match self.storage.load(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Stored value under '{}' is not valid JSON, using defaults: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                info!("No stored value under '{}', using defaults", key);
                None
            }
            Err(e) => {
                warn!("Failed to read '{}', using defaults: {}", key, e);
                None
            }
        }
    }

    /// Load settings, reconciling whatever is stored onto defaults
    pub fn load_settings(&self) -> Settings {
        match self.load_value(SETTINGS_KEY) {
            Some(value) => reconcile_settings(&Settings::default(), &value),
            None => Settings::default(),
        }
    }

    /// Load user data, sanitizing whatever is stored onto defaults
    pub fn load_user_data(&self) -> UserData {
        match self.load_value(USER_DATA_KEY) {
            Some(value) => sanitize_user_data(&UserData::default(), &value),
            None => UserData::default(),
        }
    }

    /// Load the cached catalog from the last successful fetch
    pub fn load_catalog_cache(&self) -> Vec<AppRecord> {
        let Some(value) = self.load_value(CATALOG_CACHE_KEY) else {
            return Vec::new();
        };
        value
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| AppRecord::from_untrusted(entry, AppOrigin::Catalog))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Persist settings
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        self.storage.save(SETTINGS_KEY, &json)
    }

    /// Persist user data
    pub fn save_user_data(&self, user_data: &UserData) -> Result<()> {
        let json = serde_json::to_string_pretty(user_data)?;
        self.storage.save(USER_DATA_KEY, &json)
    }

    /// Persist the catalog cache after a successful fetch
    pub fn save_catalog_cache(&self, catalog: &[AppRecord]) -> Result<()> {
        let json = serde_json::to_string(catalog)?;
        self.storage.save(CATALOG_CACHE_KEY, &json)
    }
}
