//! Launchpad state container
//!
//! Owns the two persisted objects (settings, user data) plus the fetched
//! catalog, and rebuilds the merged collection after every change. Every
//! mutating operation validates fully, commits a whole new object, then
//! persists fire-and-forget: a failed write is logged and the operation
//! still succeeds in memory, so state is never partially applied.

use crate::apps::identity::{derive_id, uniquify};
use crate::apps::merge::{dedupe_hidden_ids, merge_collection};
use crate::apps::record::{AppOrigin, AppRecord, CustomAppDraft};
use crate::apps::view::{self, ViewProjection};
use crate::backup::{self, BackupDocument};
use crate::catalog::{CatalogSource, FetchCoordinator};
use crate::config::ConfigManager;
use crate::config::models::{Settings, UserData};
use crate::config::reconcile::reconcile_settings;
use crate::error::{LaunchdeckError, Result};
use crate::sanitize::{normalize_page_size, sanitize_icon, sanitize_url};
use crate::storage::StorageBackend;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything rebuilt or replaced as a unit under the store lock
struct StoreState {
    settings: Settings,
    user_data: UserData,
    catalog: Vec<AppRecord>,
    /// Merged collection, rebuilt from scratch after every change
    apps: Vec<AppRecord>,
}

impl StoreState {
    /// Rebuild the merged collection and prune hidden-id bookkeeping
    fn recompute(&mut self) {
        self.apps = merge_collection(
            &self.catalog,
            &self.user_data.custom_apps,
            self.settings.hide_default_apps,
        );
        self.user_data.hidden_app_ids =
            dedupe_hidden_ids(&self.user_data.hidden_app_ids, &self.apps);
    }
}

/// The application-state reconciliation engine
///
/// One instance per running UI context; all reads and mutations go through
/// it. There is exactly one writer and no concurrent mutation path, so a
/// single mutex with whole-object commits is the entire locking story.
pub struct LaunchpadStore {
    state: Mutex<StoreState>,
    manager: ConfigManager,
    fetches: FetchCoordinator,
}

impl LaunchpadStore {
    /// Load persisted state from the given backend
    ///
    /// Missing or unreadable entries fall back to defaults; the catalog
    /// starts from the cache of the last successful fetch so the grid is
    /// populated before (or without) a refresh.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let manager = ConfigManager::new(storage);
        let mut state = StoreState {
            settings: manager.load_settings(),
            user_data: manager.load_user_data(),
            catalog: manager.load_catalog_cache(),
            apps: Vec::new(),
        };
        state.recompute();
        info!(
            "Store loaded: {} catalog, {} custom, {} hidden",
            state.catalog.len(),
            state.user_data.custom_apps.len(),
            state.user_data.hidden_app_ids.len()
        );
        Self {
            state: Mutex::new(state),
            manager,
            fetches: FetchCoordinator::new(),
        }
    }

    fn persist_settings(&self, settings: &Settings) {
        if let Err(e) = self.manager.save_settings(settings) {
            warn!("Settings not persisted, continuing in memory: {}", e);
        }
    }

    fn persist_user_data(&self, user_data: &UserData) {
        if let Err(e) = self.manager.save_user_data(user_data) {
            warn!("User data not persisted, continuing in memory: {}", e);
        }
    }

    // --- collection reads ---

    /// The merged collection in display order
    pub fn apps(&self) -> Vec<AppRecord> {
        self.state.lock().apps.clone()
    }

    /// The user's custom records
    pub fn custom_apps(&self) -> Vec<AppRecord> {
        self.state.lock().user_data.custom_apps.clone()
    }

    /// Current settings
    pub fn settings(&self) -> Settings {
        self.state.lock().settings.clone()
    }

    /// Current user data
    pub fn user_data(&self) -> UserData {
        self.state.lock().user_data.clone()
    }

    /// Project the collection into one render's view state
    pub fn project(&self, term: &str, page: usize, mobile: bool) -> ViewProjection {
        let state = self.state.lock();
        view::project(
            &state.apps,
            &state.user_data.hidden_app_ids,
            term,
            page,
            mobile,
            state.user_data.page_size,
        )
    }

    // --- hidden-app bookkeeping ---

    /// Hide an app; returns whether anything changed
    pub fn hide_app(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        let exists = state.apps.iter().any(|record| record.id == id);
        let already_hidden = state.user_data.hidden_app_ids.iter().any(|h| h == id);
        if !exists || already_hidden {
            return false;
        }
        state.user_data.hidden_app_ids.push(id.to_string());
        state.recompute();
        self.persist_user_data(&state.user_data);
        true
    }

    /// Unhide an app; returns whether anything changed
    pub fn show_app(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        let before = state.user_data.hidden_app_ids.len();
        state.user_data.hidden_app_ids.retain(|h| h != id);
        if state.user_data.hidden_app_ids.len() == before {
            return false;
        }
        state.recompute();
        self.persist_user_data(&state.user_data);
        true
    }

    // --- custom apps ---

    fn validate_draft(draft: &CustomAppDraft) -> Result<(String, String)> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(LaunchdeckError::Validation(
                "Please enter a name.".to_string(),
            ));
        }
        let url = sanitize_url(&draft.url);
        if url.is_empty() {
            return Err(LaunchdeckError::Validation(
                "Please enter a valid URL.".to_string(),
            ));
        }
        Ok((name, url))
    }

    fn clean_tags(tags: &[String]) -> Vec<String> {
        tags.iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Create a custom app from user input
    ///
    /// The id is assigned here, against the current collection's id set, so
    /// it stays stable across merges. Validation failure makes no state
    /// change.
    pub fn add_custom_app(&self, draft: &CustomAppDraft) -> Result<AppRecord> {
        let (name, url) = Self::validate_draft(draft)?;

        let mut state = self.state.lock();
        let taken: HashSet<String> = state.apps.iter().map(|r| r.id.clone()).collect();
        let record = AppRecord {
            id: uniquify(&derive_id(&name, AppOrigin::Custom), &taken),
            name,
            description: draft.description.trim().to_string(),
            url,
            icon: sanitize_icon(&draft.icon),
            tags: Self::clean_tags(&draft.tags),
            origin: AppOrigin::Custom,
        };

        state.user_data.custom_apps.push(record.clone());
        state.recompute();
        self.persist_user_data(&state.user_data);
        info!("Added custom app '{}'", record.id);
        Ok(record)
    }

    /// Replace the fields of an existing custom app, keeping its id
    pub fn update_custom_app(&self, id: &str, draft: &CustomAppDraft) -> Result<AppRecord> {
        let (name, url) = Self::validate_draft(draft)?;

        let mut state = self.state.lock();
        let Some(existing) = state
            .user_data
            .custom_apps
            .iter_mut()
            .find(|record| record.id == id)
        else {
            return Err(LaunchdeckError::Validation(
                "This app no longer exists.".to_string(),
            ));
        };

        existing.name = name;
        existing.description = draft.description.trim().to_string();
        existing.url = url;
        existing.icon = sanitize_icon(&draft.icon);
        existing.tags = Self::clean_tags(&draft.tags);
        let updated = existing.clone();

        state.recompute();
        self.persist_user_data(&state.user_data);
        info!("Updated custom app '{}'", id);
        Ok(updated)
    }

    /// Delete a custom app; returns whether anything changed
    pub fn remove_custom_app(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        let before = state.user_data.custom_apps.len();
        state.user_data.custom_apps.retain(|record| record.id != id);
        if state.user_data.custom_apps.len() == before {
            return false;
        }
        state.recompute();
        self.persist_user_data(&state.user_data);
        info!("Removed custom app '{}'", id);
        true
    }

    // --- settings ---

    /// Apply an untrusted partial settings update
    pub fn apply_settings(&self, partial: &Value) -> Settings {
        let mut state = self.state.lock();
        let settings = reconcile_settings(&state.settings, partial);
        self.commit_settings(&mut state, settings)
    }

    /// Replace settings from a typed caller
    pub fn update_settings(&self, settings: &Settings) -> Settings {
        let mut state = self.state.lock();
        self.commit_settings(&mut state, settings.normalized())
    }

    fn commit_settings(&self, state: &mut StoreState, settings: Settings) -> Settings {
        let hidden_before = state.user_data.hidden_app_ids.clone();
        state.settings = settings.clone();
        state.recompute(); // hide_default_apps may have changed the merge
        self.persist_settings(&state.settings);
        if state.user_data.hidden_app_ids != hidden_before {
            self.persist_user_data(&state.user_data);
        }
        settings
    }

    /// Set the desktop tiles-per-page, normalized to a valid size
    pub fn set_page_size(&self, size: u32) -> u32 {
        let normalized = normalize_page_size(f64::from(size));
        let mut state = self.state.lock();
        state.user_data.page_size = normalized;
        self.persist_user_data(&state.user_data);
        normalized
    }

    // --- backup ---

    /// Snapshot current state for export
    pub fn export_backup(&self) -> BackupDocument {
        let state = self.state.lock();
        backup::export_backup(&state.settings, &state.user_data)
    }

    /// Validate and apply an imported backup payload
    ///
    /// Rejection happens before anything is applied; on success only the
    /// sections the snapshot carried are replaced, and both are persisted.
    pub fn import_backup(&self, raw: &Value) -> Result<String> {
        let mut state = self.state.lock();
        let import = backup::import_backup(raw, &state.settings, &state.user_data)?;

        if let Some(settings) = &import.settings {
            state.settings = settings.clone();
            self.persist_settings(settings);
        }
        if let Some(user_data) = &import.user_data {
            state.user_data = user_data.clone();
        }
        state.recompute();
        if import.user_data.is_some() {
            self.persist_user_data(&state.user_data);
        }
        Ok(import.summary())
    }

    // --- catalog ---

    /// Issue a token for a new catalog fetch, superseding in-flight ones
    pub fn begin_fetch(&self) -> u64 {
        self.fetches.begin()
    }

    /// Apply a finished fetch if its token is still current
    ///
    /// Returns whether the result was applied. A failed fetch keeps the
    /// stale catalog so custom apps and cached entries stay usable.
    pub fn complete_fetch(&self, token: u64, result: Result<Vec<AppRecord>>) -> bool {
        if !self.fetches.is_current(token) {
            debug!("Discarding superseded catalog fetch (token {})", token);
            return false;
        }
        match result {
            Ok(records) => {
                let mut state = self.state.lock();
                state.catalog = records;
                state.recompute();
                if let Err(e) = self.manager.save_catalog_cache(&state.catalog) {
                    warn!("Catalog cache not persisted: {}", e);
                }
                self.persist_user_data(&state.user_data);
                info!("Catalog applied: {} records", state.catalog.len());
                true
            }
            Err(e) => {
                warn!("Catalog fetch failed, keeping previous entries: {}", e);
                false
            }
        }
    }

    /// Fetch from `source` and apply the result, one call
    pub fn refresh_catalog(&self, source: &dyn CatalogSource) -> Result<usize> {
        let token = self.begin_fetch();
        let records = source.fetch()?;
        let count = records.len();
        self.complete_fetch(token, Ok(records));
        Ok(count)
    }
}
