#![no_main]

use launchdeck::backup::import_backup;
use launchdeck::config::models::{Settings, UserData};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes -> JSON -> import must never panic, and whenever it
    // succeeds the resulting objects must already be fully valid
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
            let settings = Settings::default();
            let user_data = UserData::default();
            if let Ok(import) = import_backup(&value, &settings, &user_data) {
                if let Some(imported) = import.settings {
                    assert_eq!(imported, imported.normalized());
                }
                if let Some(imported) = import.user_data {
                    assert_eq!(imported, imported.normalized());
                }
            }
        }
    }
});
