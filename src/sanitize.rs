//! Input sanitizers
//!
//! Pure functions that turn untrusted values (catalog entries, user input,
//! imported backups) into safe canonical forms. Every function here is
//! total: malformed input yields an empty string, a default, or a clamped
//! value — never a panic and never an error that callers must handle.

use crate::config::models::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE, PAGE_SIZE_STEP};
use serde_json::Value;
use url::Url;

/// Icon used when a supplied icon source is rejected
pub const DEFAULT_ICON: &str = "/icons/default.svg";

/// Schemes that must never survive sanitization, in any casing
const FORBIDDEN_SCHEMES: [&str; 3] = ["javascript:", "data:", "vbscript:"];

/// Sanitize a user- or catalog-supplied URL into canonical form
///
/// Trims the input, rejects script schemes, prefixes `https://` for
/// scheme-less values and `https:` for protocol-relative ones, then parses
/// with the `url` crate and accepts only `http`/`https`. Returns the
/// canonical string form, or `""` on any failure.
pub fn sanitize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    if FORBIDDEN_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        return String::new();
    }

    let candidate = if trimmed.starts_with("//") {
        format!("https:{trimmed}")
    } else if !trimmed.contains("://") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };

    match Url::parse(&candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url.to_string(),
        _ => String::new(),
    }
}

/// Accept an image source if it is an http(s) URL, a `data:image/` URI,
/// or a root/relative path
fn accept_image_source(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:image/")
        || trimmed.starts_with("./")
        || trimmed.starts_with('/')
    {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Sanitize an app icon source, falling back to [`DEFAULT_ICON`]
///
/// Script schemes and anything else outside the accepted set are replaced
/// by the default, never passed through.
pub fn sanitize_icon(raw: &str) -> String {
    accept_image_source(raw).unwrap_or_else(|| DEFAULT_ICON.to_string())
}

/// Sanitize a background image source, falling back to `""`
///
/// Same acceptance set as [`sanitize_icon`]; an empty result tells the
/// renderer to fall back to the background color.
pub fn sanitize_image_source(raw: &str) -> String {
    accept_image_source(raw).unwrap_or_default()
}

/// Split comma-separated tag input, trimming entries and dropping empties
pub fn split_tag_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sanitize a tag list from an untrusted JSON value
///
/// Accepts an array of strings or a comma-separated string; anything else
/// yields an empty list.
pub fn sanitize_tags(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => split_tag_input(s),
        _ => Vec::new(),
    }
}

/// Clamp a numeric value into `[min, max]`
///
/// Non-finite input (NaN, infinities) yields `fallback`. Total for all
/// `f64` inputs.
pub fn clamp(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Read a number out of an untrusted JSON value
///
/// Accepts JSON numbers and strings that parse as `f64` (backups written
/// by hand or by older exporters sometimes quote numerics).
pub fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Normalize a color to lowercase `#rrggbb` form
///
/// Accepts `#rgb` and `#rrggbb` with an optional leading `#`. Parse
/// failure yields `fallback` unchanged.
pub fn resolve_hex_color(raw: &str, fallback: &str) -> String {
    let hex = raw.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return fallback.to_string();
    }
    match hex.len() {
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{}", expanded.to_lowercase())
        }
        6 => format!("#{}", hex.to_lowercase()),
        _ => fallback.to_string(),
    }
}

/// Normalize a page size into a valid grid capacity
///
/// Clamps into `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]` and rounds to the nearest
/// multiple of [`PAGE_SIZE_STEP`]. Non-finite input yields the default.
pub fn normalize_page_size(value: f64) -> u32 {
    if !value.is_finite() {
        return DEFAULT_PAGE_SIZE;
    }
    let clamped = value.clamp(f64::from(MIN_PAGE_SIZE), f64::from(MAX_PAGE_SIZE));
    let step = f64::from(PAGE_SIZE_STEP);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped into the u32 page-size range before casting"
    )]
    let rounded = ((clamped / step).round() * step) as u32;
    rounded.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}
