//! Backup codec
//!
//! Serializes the two persisted objects into a versioned snapshot and
//! validates imported snapshots back into state. Import is all-or-nothing
//! per section: a malformed payload is rejected before anything is applied,
//! and individual bad custom-app entries are dropped rather than failing
//! the import.

use crate::config::models::{Settings, UserData};
use crate::config::reconcile::{reconcile_settings, sanitize_user_data};
use crate::error::{LaunchdeckError, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Schema version written into every exported snapshot
///
/// Import reads any version best-effort (unknown fields are ignored), so
/// version-1 documents stay readable across future bumps.
pub const BACKUP_SCHEMA_VERSION: u32 = 1;

/// A full-state snapshot; created only on export, consumed only on import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// Schema version, [`BACKUP_SCHEMA_VERSION`] at export time
    pub version: u32,
    /// Version of the app that produced the snapshot
    pub app_version: String,
    /// RFC 3339 export timestamp
    pub generated_at: String,
    /// Appearance settings at export time
    pub settings: Settings,
    /// User data at export time
    pub user_data: UserData,
}

impl BackupDocument {
    /// Download filename suggested to the caller, dated for sorting
    ///
    /// The date comes from the snapshot's own `generatedAt` so filename
    /// and timestamp can never disagree; a document with an unparsable
    /// timestamp falls back to the current date.
    pub fn suggested_filename(&self) -> String {
        let date = chrono::DateTime::parse_from_rfc3339(&self.generated_at)
            .map_or_else(|_| chrono::Utc::now().date_naive(), |ts| ts.date_naive());
        format!("launchdeck-backup-{date}.json")
    }
}

/// Wrap current state into a snapshot
///
/// Serialization to bytes and delivering the file are the caller's
/// concern; the codec's contract ends at this structured payload.
pub fn export_backup(settings: &Settings, user_data: &UserData) -> BackupDocument {
    BackupDocument {
        version: BACKUP_SCHEMA_VERSION,
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        settings: settings.clone(),
        user_data: user_data.clone(),
    }
}

/// Sections of an imported snapshot that validated and should be applied
#[derive(Debug, Clone, PartialEq)]
pub struct BackupImport {
    /// Reconciled settings, when the snapshot carried a settings object
    pub settings: Option<Settings>,
    /// Sanitized user data, when the snapshot carried a userData object
    pub user_data: Option<UserData>,
}

impl BackupImport {
    /// Human-readable summary naming which sections were applied
    pub fn summary(&self) -> String {
        match (&self.settings, &self.user_data) {
            (Some(_), Some(_)) => "Imported settings and app data.".to_string(),
            (Some(_), None) => "Imported settings.".to_string(),
            (None, Some(_)) => "Imported app data.".to_string(),
            (None, None) => "Nothing to import.".to_string(),
        }
    }
}

/// Validate an arbitrary parsed value as a backup snapshot
///
/// Settings are reconciled starting from defaults (not from current state)
/// so a backup restores the appearance it was taken with, except
/// `hasCompletedSetup` which is kept from current state unless the snapshot
/// carries an explicit boolean. User data overlays current state: fields
/// absent from the snapshot keep their current values (partial import is
/// legal).
pub fn import_backup(
    raw: &Value,
    current_settings: &Settings,
    current_user_data: &UserData,
) -> Result<BackupImport> {
    let obj = raw.as_object().ok_or(LaunchdeckError::InvalidBackup)?;

    check_producer_version(obj);

    let incoming_settings = obj.get("settings").filter(|v| v.is_object());
    let incoming_user_data = obj.get("userData").filter(|v| v.is_object());

    if incoming_settings.is_none() && incoming_user_data.is_none() {
        return Err(LaunchdeckError::MissingBackupData);
    }

    let settings = incoming_settings.map(|incoming| {
        let mut settings = reconcile_settings(&Settings::default(), incoming);
        settings.has_completed_setup = incoming
            .get("hasCompletedSetup")
            .and_then(Value::as_bool)
            .unwrap_or(current_settings.has_completed_setup);
        settings
    });

    let user_data =
        incoming_user_data.map(|incoming| sanitize_user_data(current_user_data, incoming));

    let import = BackupImport {
        settings,
        user_data,
    };
    info!("Backup validated: {}", import.summary());
    Ok(import)
}

/// Log when the snapshot was written by a newer schema or newer app
fn check_producer_version(obj: &serde_json::Map<String, Value>) {
    let schema_version = obj.get("version").and_then(Value::as_u64).unwrap_or(0);
    if schema_version > u64::from(BACKUP_SCHEMA_VERSION) {
        warn!(
            "Backup schema version {} is newer than supported {}; reading best-effort",
            schema_version, BACKUP_SCHEMA_VERSION
        );
    }

    let producer = obj
        .get("appVersion")
        .and_then(Value::as_str)
        .and_then(|s| Version::parse(s.trim_start_matches('v')).ok());
    if let Some(producer) = producer {
        let running =
            Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or_else(|_| Version::new(0, 0, 0));
        if producer > running {
            warn!(
                "Backup was exported by launchdeck {} (running {})",
                producer, running
            );
        }
    }
}
