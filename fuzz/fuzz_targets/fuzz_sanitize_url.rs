#![no_main]

use launchdeck::sanitize::{sanitize_icon, sanitize_url};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must never panic, and must never let a script scheme through
        let url = sanitize_url(s);
        assert!(
            url.is_empty() || url.starts_with("http://") || url.starts_with("https://"),
            "sanitize_url produced unexpected scheme: {url}"
        );

        let icon = sanitize_icon(s);
        assert!(!icon.to_lowercase().starts_with("javascript:"));
        assert!(!icon.to_lowercase().starts_with("vbscript:"));
    }
});
