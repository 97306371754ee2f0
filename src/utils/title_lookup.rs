//! Page-title lookup
//!
//! Fetches a page and extracts its `<title>` to pre-fill the name field
//! when adding a custom app. Best-effort only: failures surface as an
//! error the caller reports without aborting the add.

use crate::error::{LaunchdeckError, Result, StringError};
use crate::sanitize::sanitize_url;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP timeout for title requests
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Read at most this much of the body; titles live in the head
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Fetch `url` and return its page title
///
/// The URL goes through the same sanitizer as stored records first, so a
/// script scheme can never reach the network layer.
pub fn resolve_title(url: &str) -> Result<String> {
    let target = sanitize_url(url);
    if target.is_empty() {
        return Err(LaunchdeckError::Validation(
            "Please enter a valid URL.".to_string(),
        ));
    }

    debug!("Looking up page title for {}", target);

    let client = reqwest::blocking::Client::builder()
        .timeout(LOOKUP_TIMEOUT)
        .user_agent(format!("launchdeck/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| LaunchdeckError::TitleLookupFailed(Box::new(e)))?;

    let response = client.get(&target).send().map_err(|e| {
        warn!("Title lookup request failed: {}", e);
        LaunchdeckError::TitleLookupFailed(Box::new(e))
    })?;

    if !response.status().is_success() {
        return Err(LaunchdeckError::TitleLookupFailed(StringError::new(
            format!("page returned {}", response.status()),
        )));
    }

    let mut body = Vec::new();
    response
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| LaunchdeckError::TitleLookupFailed(Box::new(e)))?;
    let html = String::from_utf8_lossy(&body);

    extract_title(&html).ok_or_else(|| {
        LaunchdeckError::TitleLookupFailed(StringError::new("page has no title"))
    })
}

/// Pull the `<title>` text out of an HTML document
///
/// Case-insensitive tag match, whitespace collapsed, common entities
/// unescaped. Not a parser; good enough for a pre-filled form field.
/// The tags are ASCII, so ASCII lowercasing suffices for matching and,
/// unlike Unicode lowercasing, keeps byte offsets valid for slicing the
/// original document.
fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find("<title")?;
    let content_start = open + lower[open..].find('>')? + 1;
    let content_end = content_start + lower[content_start..].find("</title")?;

    let raw = &html[content_start..content_end];
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let title = unescape_entities(&collapsed);
    if title.is_empty() { None } else { Some(title) }
}

fn unescape_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_title_basic() {
        let html = "<html><head><title>My Page</title></head></html>";
        assert_eq!(extract_title(html).as_deref(), Some("My Page"));
    }

    #[test]
    fn test_extract_title_case_and_attributes() {
        let html = r#"<TITLE data-x="1">  Spaced
            out  </TITLE>"#;
        assert_eq!(extract_title(html).as_deref(), Some("Spaced out"));
    }

    #[test]
    fn test_extract_title_entities() {
        let html = "<title>Fish &amp; Chips &#39;n&#39; more</title>";
        assert_eq!(extract_title(html).as_deref(), Some("Fish & Chips 'n' more"));
    }

    #[test]
    fn test_extract_title_multibyte_documents() {
        // Characters whose Unicode lowercase form changes byte length
        // (e.g. İ -> i̇) must not shift the slice offsets
        let html = "İİİ<title>é and ß</title>";
        assert_eq!(extract_title(html).as_deref(), Some("é and ß"));

        let html = "<html lang=\"tr\">İstanbul<TITLE>Başlık</TITLE></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Başlık"));
    }

    #[test]
    fn test_extract_title_missing_or_empty() {
        assert_eq!(extract_title("<html><body>no title</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
        assert_eq!(extract_title("<title>never closed"), None);
    }

    #[test]
    fn test_resolve_title_rejects_bad_urls_before_network() {
        let err = resolve_title("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, LaunchdeckError::Validation(_)));
    }
}
