//! Backup protocol tests for `launchdeck`
//!
//! End-to-end export/import flows through the store, including the
//! malformed-payload taxonomy and the version-1 compatibility contract.

use launchdeck::LaunchpadStore;
use launchdeck::apps::record::CustomAppDraft;
use launchdeck::backup::BACKUP_SCHEMA_VERSION;
use launchdeck::config::models::{MAX_PAGE_SIZE, OVERLAY_OPACITY_MAX};
use launchdeck::error::LaunchdeckError;
use launchdeck::storage::MemoryStorage;
use serde_json::json;
use std::sync::Arc;

fn store() -> LaunchpadStore {
    LaunchpadStore::load(Arc::new(MemoryStorage::new()))
}

fn populated_store() -> LaunchpadStore {
    let store = store();
    store
        .add_custom_app(&CustomAppDraft {
            name: "Wiki".to_string(),
            url: "wiki.example.com".to_string(),
            description: "Team wiki".to_string(),
            icon: "/icons/wiki.svg".to_string(),
            tags: vec!["notes".to_string()],
        })
        .unwrap();
    store.apply_settings(&json!({
        "backgroundType": "color",
        "backgroundColor": "#336699",
        "overlayOpacity": 0.2,
        "hideDefaultApps": true
    }));
    store.set_page_size(32);
    store
}

#[test]
fn test_export_wire_format() {
    let doc = populated_store().export_backup();
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["version"], u64::from(BACKUP_SCHEMA_VERSION));
    assert_eq!(value["appVersion"], env!("CARGO_PKG_VERSION"));
    assert!(value["generatedAt"].is_string());
    assert_eq!(value["settings"]["backgroundColor"], "#336699");
    assert_eq!(value["userData"]["pageSize"], 32);
    assert_eq!(value["userData"]["customApps"][0]["id"], "custom-wiki");
}

#[test]
fn test_round_trip_restores_identical_state() {
    let source = populated_store();
    let raw = serde_json::to_value(source.export_backup()).unwrap();

    let target = store();
    let summary = target.import_backup(&raw).unwrap();
    assert_eq!(summary, "Imported settings and app data.");
    assert_eq!(target.settings(), source.settings());
    assert_eq!(target.user_data(), source.user_data());
}

#[test]
fn test_import_clamps_out_of_range_scenario() {
    let store = store();
    store
        .import_backup(&json!({
            "settings": {"overlayOpacity": 5},
            "userData": {"pageSize": 999}
        }))
        .unwrap();

    assert!((store.settings().overlay_opacity - OVERLAY_OPACITY_MAX).abs() < f64::EPSILON);
    assert_eq!(store.user_data().page_size, MAX_PAGE_SIZE);
}

#[test]
fn test_import_taxonomy() {
    let store = store();

    // Not an object at all
    let err = store.import_backup(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, LaunchdeckError::InvalidBackup));

    // Parses but carries neither section
    let err = store
        .import_backup(&json!({"version": 1, "appVersion": "0.1.0"}))
        .unwrap_err();
    assert!(matches!(err, LaunchdeckError::MissingBackupData));
}

#[test]
fn test_import_settings_only() {
    let store = populated_store();
    let custom_before = store.custom_apps();

    let summary = store
        .import_backup(&json!({"settings": {"blurStrength": 3}}))
        .unwrap();
    assert_eq!(summary, "Imported settings.");
    assert!((store.settings().blur_strength - 3.0).abs() < f64::EPSILON);
    // User data untouched by a settings-only snapshot
    assert_eq!(store.custom_apps(), custom_before);
}

#[test]
fn test_import_drops_invalid_custom_apps_silently() {
    let store = store();
    let summary = store
        .import_backup(&json!({
            "userData": {
                "customApps": [
                    {"name": "Keep", "url": "keep.example.com"},
                    {"name": "", "url": "https://bad.example"},
                    {"name": "NoUrl"},
                    42
                ]
            }
        }))
        .unwrap();
    assert_eq!(summary, "Imported app data.");
    let custom = store.custom_apps();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0].name, "Keep");
}

#[test]
fn test_import_version_1_document_verbatim() {
    // A canonical version-1 document must stay importable forever
    let raw = json!({
        "version": 1,
        "appVersion": "0.1.0",
        "generatedAt": "2024-03-01T12:00:00Z",
        "settings": {
            "backgroundType": "image",
            "backgroundImage": "/backgrounds/dunes.jpg",
            "backgroundColor": "#0f172a",
            "overlayOpacity": 0.35,
            "blurStrength": 12.0,
            "glassColor": "#1e293b",
            "glassOpacity": 0.35,
            "hideDefaultApps": false,
            "mobileLayout": "grid",
            "hasCompletedSetup": true
        },
        "userData": {
            "hiddenAppIds": ["app-docs"],
            "customApps": [{
                "id": "custom-wiki",
                "name": "Wiki",
                "description": "",
                "url": "https://wiki.example/",
                "icon": "/icons/wiki.svg",
                "tags": ["notes"]
            }],
            "pageSize": 16
        }
    });

    let store = store();
    store.import_backup(&raw).unwrap();
    assert!(store.settings().has_completed_setup);
    assert_eq!(store.custom_apps()[0].id, "custom-wiki");
    assert_eq!(store.user_data().page_size, 16);
}

#[test]
fn test_import_newer_schema_best_effort() {
    let store = store();
    let summary = store
        .import_backup(&json!({
            "version": BACKUP_SCHEMA_VERSION + 3,
            "appVersion": "99.1.0",
            "settings": {"mobileLayout": "list"},
            "someFutureSection": {"ignored": true}
        }))
        .unwrap();
    assert_eq!(summary, "Imported settings.");
    assert_eq!(
        store.settings().mobile_layout,
        launchdeck::config::MobileLayout::List
    );
}

#[test]
fn test_failed_import_leaves_state_untouched() {
    let store = populated_store();
    let settings_before = store.settings();
    let user_data_before = store.user_data();

    assert!(store.import_backup(&json!(null)).is_err());
    assert!(store.import_backup(&json!({"settings": [], "userData": "x"})).is_err());

    assert_eq!(store.settings(), settings_before);
    assert_eq!(store.user_data(), user_data_before);
}
