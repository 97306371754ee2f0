//! Configuration data models
//!
//! This module defines the settings and user-data structures persisted by
//! the application, together with their defaults and valid ranges.

use crate::apps::record::AppRecord;
use crate::sanitize::{clamp, normalize_page_size, resolve_hex_color, sanitize_image_source};
use serde::{Deserialize, Serialize};

/// Overlay opacity minimum
pub const OVERLAY_OPACITY_MIN: f64 = 0.0;
/// Overlay opacity maximum
pub const OVERLAY_OPACITY_MAX: f64 = 0.6;
/// Backdrop blur minimum (pixels)
pub const BLUR_STRENGTH_MIN: f64 = 0.0;
/// Backdrop blur maximum (pixels)
pub const BLUR_STRENGTH_MAX: f64 = 20.0;
/// Glass tint opacity minimum
pub const GLASS_OPACITY_MIN: f64 = 0.05;
/// Glass tint opacity maximum
pub const GLASS_OPACITY_MAX: f64 = 0.95;

/// Default overlay opacity
pub const DEFAULT_OVERLAY_OPACITY: f64 = 0.35;
/// Default backdrop blur (pixels)
pub const DEFAULT_BLUR_STRENGTH: f64 = 12.0;
/// Default glass tint opacity
pub const DEFAULT_GLASS_OPACITY: f64 = 0.35;
/// Default background color
pub const DEFAULT_BACKGROUND_COLOR: &str = "#0f172a";
/// Default glass tint color
pub const DEFAULT_GLASS_COLOR: &str = "#1e293b";

/// Tiles-per-page granularity; page sizes are always a multiple of this
pub const PAGE_SIZE_STEP: u32 = 4;
/// Smallest allowed page size
pub const MIN_PAGE_SIZE: u32 = 8;
/// Largest allowed page size
pub const MAX_PAGE_SIZE: u32 = 48;
/// Page size used until the user changes it
pub const DEFAULT_PAGE_SIZE: u32 = 16;

/// Background rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    /// Background image with color fallback when the image is empty
    #[default]
    Image,
    /// Flat background color
    Color,
}

/// Layout used on small viewports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MobileLayout {
    /// Tile grid, same as desktop
    #[default]
    Grid,
    /// Vertical list with continuous scroll
    List,
}

/// Appearance and behavior preferences
///
/// Every numeric field is kept clamped into its range and every color
/// normalized to `#rrggbb`; [`Settings::normalized`] re-establishes this
/// for values produced by typed callers, and
/// [`crate::config::reconcile_settings`] does it for untrusted partials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Background rendering mode
    pub background_type: BackgroundType,
    /// Background image source; empty means "use the color"
    pub background_image: String,
    /// Background color, `#rrggbb`
    pub background_color: String,
    /// Dark overlay opacity over the background
    pub overlay_opacity: f64,
    /// Backdrop blur strength in pixels
    pub blur_strength: f64,
    /// Glass tint color, `#rrggbb`
    pub glass_color: String,
    /// Glass tint opacity
    pub glass_opacity: f64,
    /// Drop catalog records from the merged collection
    pub hide_default_apps: bool,
    /// Small-viewport layout
    pub mobile_layout: MobileLayout,
    /// First-run setup wizard completed
    pub has_completed_setup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_type: BackgroundType::Image,
            background_image: String::new(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
            blur_strength: DEFAULT_BLUR_STRENGTH,
            glass_color: DEFAULT_GLASS_COLOR.to_string(),
            glass_opacity: DEFAULT_GLASS_OPACITY,
            hide_default_apps: false,
            mobile_layout: MobileLayout::Grid,
            has_completed_setup: false,
        }
    }
}

impl Settings {
    /// Re-validate every field, returning a fully-in-range copy
    ///
    /// Typed callers can construct out-of-range values; this is the gate
    /// they pass through before anything is committed or persisted.
    pub fn normalized(&self) -> Self {
        Self {
            background_type: self.background_type,
            background_image: sanitize_image_source(&self.background_image),
            background_color: resolve_hex_color(&self.background_color, DEFAULT_BACKGROUND_COLOR),
            overlay_opacity: clamp(
                self.overlay_opacity,
                OVERLAY_OPACITY_MIN,
                OVERLAY_OPACITY_MAX,
                DEFAULT_OVERLAY_OPACITY,
            ),
            blur_strength: clamp(
                self.blur_strength,
                BLUR_STRENGTH_MIN,
                BLUR_STRENGTH_MAX,
                DEFAULT_BLUR_STRENGTH,
            ),
            glass_color: resolve_hex_color(&self.glass_color, DEFAULT_GLASS_COLOR),
            glass_opacity: clamp(
                self.glass_opacity,
                GLASS_OPACITY_MIN,
                GLASS_OPACITY_MAX,
                DEFAULT_GLASS_OPACITY,
            ),
            hide_default_apps: self.hide_default_apps,
            mobile_layout: self.mobile_layout,
            has_completed_setup: self.has_completed_setup,
        }
    }
}

/// Per-user collection state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    /// Ids of hidden apps; ordered, deduped, pruned on every merge
    pub hidden_app_ids: Vec<String>,
    /// User-created app records
    pub custom_apps: Vec<AppRecord>,
    /// Tiles per desktop page, multiple of [`PAGE_SIZE_STEP`]
    pub page_size: u32,
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            hidden_app_ids: Vec::new(),
            custom_apps: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl UserData {
    /// Re-validate every field, returning a fully-valid copy
    pub fn normalized(&self) -> Self {
        Self {
            hidden_app_ids: self
                .hidden_app_ids
                .iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            custom_apps: self.custom_apps.clone(),
            page_size: normalize_page_size(f64::from(self.page_size)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_range() {
        let settings = Settings::default();
        assert_eq!(settings, settings.normalized());
        assert_eq!(UserData::default().page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_normalized_clamps_out_of_range_values() {
        let settings = Settings {
            overlay_opacity: 5.0,
            blur_strength: -3.0,
            glass_opacity: f64::NAN,
            background_color: "purple".to_string(),
            ..Settings::default()
        };
        let normalized = settings.normalized();
        assert!((normalized.overlay_opacity - OVERLAY_OPACITY_MAX).abs() < f64::EPSILON);
        assert!((normalized.blur_strength - BLUR_STRENGTH_MIN).abs() < f64::EPSILON);
        assert!((normalized.glass_opacity - DEFAULT_GLASS_OPACITY).abs() < f64::EPSILON);
        assert_eq!(normalized.background_color, DEFAULT_BACKGROUND_COLOR);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("backgroundType"));
        assert!(json.contains("hideDefaultApps"));
        assert!(json.contains("\"image\""));

        let roundtripped: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtripped, Settings::default());
    }

    #[test]
    fn test_user_data_wire_form() {
        let json = serde_json::to_string(&UserData::default()).unwrap();
        assert!(json.contains("hiddenAppIds"));
        assert!(json.contains("customApps"));
        assert!(json.contains("pageSize"));
    }
}
