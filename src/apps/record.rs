//! App record data model
//!
//! This module defines the app record shared by catalog and custom entries,
//! plus the single validating parse step for untrusted record-like values.

use crate::sanitize::{sanitize_icon, sanitize_tags, sanitize_url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an app record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppOrigin {
    /// Rebuilt from the remote catalog on every load, never persisted
    Catalog,
    /// Created and edited by the user, persisted in user data
    #[default]
    Custom,
}

impl AppOrigin {
    /// Prefix used when deriving an id from the record name
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Catalog => "app",
            Self::Custom => "custom",
        }
    }
}

/// One launchable app tile
///
/// `origin` is not part of the wire form: persisted records are implicitly
/// custom, and catalog records are recreated from the remote source on
/// every load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRecord {
    /// Unique within the working collection; empty means "derive at merge"
    #[serde(default)]
    pub id: String,
    /// Display name, non-empty after validation
    pub name: String,
    /// Short description shown on the tile, searchable
    #[serde(default)]
    pub description: String,
    /// Empty or a well-formed http(s) URL
    #[serde(default)]
    pub url: String,
    /// http(s) URL, `data:image/` URI, root/relative path, or the default
    #[serde(default)]
    pub icon: String,
    /// Non-empty trimmed strings, order preserved
    #[serde(default)]
    pub tags: Vec<String>,
    /// Catalog or custom, assigned at merge time
    #[serde(skip)]
    pub origin: AppOrigin,
}

impl AppRecord {
    /// Parse an untrusted record-like JSON value into a validated record
    ///
    /// This is the only path by which external data (catalog entries,
    /// imported custom apps) becomes an [`AppRecord`]; no downstream code
    /// reads raw fields. Returns `None` when required fields are missing:
    /// every record needs a non-empty name, and a custom record also needs
    /// a sanitizable URL.
    pub fn from_untrusted(value: &Value, origin: AppOrigin) -> Option<Self> {
        let obj = value.as_object()?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        if name.is_empty() {
            return None;
        }

        let url = sanitize_url(obj.get("url").and_then(Value::as_str).unwrap_or_default());
        if origin == AppOrigin::Custom && url.is_empty() {
            return None;
        }

        Some(Self {
            id: obj
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            name,
            description: obj
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            url,
            icon: sanitize_icon(obj.get("icon").and_then(Value::as_str).unwrap_or_default()),
            tags: sanitize_tags(obj.get("tags").unwrap_or(&Value::Null)),
            origin,
        })
    }
}

/// Unvalidated field values for creating or editing a custom app
///
/// Collected from user input; validation happens in
/// [`crate::store::LaunchpadStore::add_custom_app`].
#[derive(Debug, Clone, Default)]
pub struct CustomAppDraft {
    /// Display name (required)
    pub name: String,
    /// Tile description
    pub description: String,
    /// Launch URL (required, sanitized)
    pub url: String,
    /// Icon source, default icon when rejected
    pub icon: String,
    /// Tag list, already split
    pub tags: Vec<String>,
}

/// One cell of the projected grid
///
/// The hidden-group aggregate is synthetic: it is built by the view
/// projector when apps are hidden and a search is not active, participates
/// in pagination and active-index wrap, and is never persisted or matched
/// by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tile {
    /// A visible app
    App(AppRecord),
    /// Aggregate tile representing `count` hidden apps
    HiddenGroup {
        /// Number of currently hidden apps
        count: usize,
    },
}
