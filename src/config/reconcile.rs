//! Settings and user-data reconciliation
//!
//! Merges untrusted partial updates into complete, bounds-checked objects.
//! The reconciler never trusts caller validation: every field is
//! re-validated independently of whether the partial supplied it, so the
//! output is always fully valid no matter how malformed the input.

use crate::apps::record::{AppOrigin, AppRecord};
use crate::config::models::{
    BLUR_STRENGTH_MAX, BLUR_STRENGTH_MIN, BackgroundType, GLASS_OPACITY_MAX, GLASS_OPACITY_MIN,
    MobileLayout, OVERLAY_OPACITY_MAX, OVERLAY_OPACITY_MIN, Settings, UserData,
};
use crate::sanitize::{
    clamp, json_number, normalize_page_size, resolve_hex_color, sanitize_image_source,
};
use serde_json::Value;

/// Overlay a partial settings update onto `base`, re-validating every field
///
/// Field resolution: value from `partial` when present, else from `base`,
/// then through the matching validator. A non-object `partial` contributes
/// nothing and yields the normalized base.
pub fn reconcile_settings(base: &Settings, partial: &Value) -> Settings {
    let Some(obj) = partial.as_object() else {
        return base.normalized();
    };

    let str_field = |key: &str| obj.get(key).and_then(Value::as_str);
    let num_field = |key: &str, base_value: f64| {
        obj.get(key).and_then(json_number).unwrap_or(base_value)
    };
    let bool_field = |key: &str, base_value: bool| {
        obj.get(key).and_then(Value::as_bool).unwrap_or(base_value)
    };

    let background_type = match str_field("backgroundType") {
        Some("color") => BackgroundType::Color,
        Some(_) => BackgroundType::Image,
        None => base.background_type,
    };
    let mobile_layout = match str_field("mobileLayout") {
        Some("grid") => MobileLayout::Grid,
        Some("list") => MobileLayout::List,
        _ => base.mobile_layout,
    };

    Settings {
        background_type,
        background_image: sanitize_image_source(
            str_field("backgroundImage").unwrap_or(&base.background_image),
        ),
        background_color: resolve_hex_color(
            str_field("backgroundColor").unwrap_or(&base.background_color),
            &base.background_color,
        ),
        overlay_opacity: clamp(
            num_field("overlayOpacity", base.overlay_opacity),
            OVERLAY_OPACITY_MIN,
            OVERLAY_OPACITY_MAX,
            base.overlay_opacity,
        ),
        blur_strength: clamp(
            num_field("blurStrength", base.blur_strength),
            BLUR_STRENGTH_MIN,
            BLUR_STRENGTH_MAX,
            base.blur_strength,
        ),
        glass_color: resolve_hex_color(
            str_field("glassColor").unwrap_or(&base.glass_color),
            &base.glass_color,
        ),
        glass_opacity: clamp(
            num_field("glassOpacity", base.glass_opacity),
            GLASS_OPACITY_MIN,
            GLASS_OPACITY_MAX,
            base.glass_opacity,
        ),
        hide_default_apps: bool_field("hideDefaultApps", base.hide_default_apps),
        mobile_layout,
        has_completed_setup: bool_field("hasCompletedSetup", base.has_completed_setup),
    }
    .normalized()
}

/// Overlay a partial user-data update onto `base`, sanitizing every field
///
/// Custom-app entries go through [`AppRecord::from_untrusted`]; entries
/// lacking a name or a sanitizable URL are silently dropped rather than
/// failing the whole update. Fields absent from `partial` keep their base
/// values.
pub fn sanitize_user_data(base: &UserData, partial: &Value) -> UserData {
    let Some(obj) = partial.as_object() else {
        return base.normalized();
    };

    let custom_apps = match obj.get("customApps").and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| AppRecord::from_untrusted(entry, AppOrigin::Custom))
            .collect(),
        None => base.custom_apps.clone(),
    };

    let hidden_app_ids = match obj.get("hiddenAppIds").and_then(Value::as_array) {
        Some(ids) => {
            let mut seen = std::collections::HashSet::new();
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|id| !id.is_empty() && seen.insert(id.to_string()))
                .map(str::to_string)
                .collect()
        }
        None => base.hidden_app_ids.clone(),
    };

    let page_size = obj
        .get("pageSize")
        .and_then(json_number)
        .map_or(base.page_size, normalize_page_size);

    UserData {
        hidden_app_ids,
        custom_apps,
        page_size,
    }
    .normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reconcile_clamps_supplied_numbers() {
        let base = Settings::default();
        let result = reconcile_settings(&base, &json!({"overlayOpacity": 5, "blurStrength": -2}));
        assert!((result.overlay_opacity - OVERLAY_OPACITY_MAX).abs() < f64::EPSILON);
        assert!((result.blur_strength - BLUR_STRENGTH_MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reconcile_background_type_exact_match_only() {
        let base = Settings::default();
        assert_eq!(
            reconcile_settings(&base, &json!({"backgroundType": "color"})).background_type,
            BackgroundType::Color
        );
        assert_eq!(
            reconcile_settings(&base, &json!({"backgroundType": "COLOR"})).background_type,
            BackgroundType::Image
        );
        assert_eq!(
            reconcile_settings(&base, &json!({"backgroundType": "plaid"})).background_type,
            BackgroundType::Image
        );
    }

    #[test]
    fn test_reconcile_bad_color_falls_back_to_base() {
        let base = Settings {
            background_color: "#112233".to_string(),
            ..Settings::default()
        };
        let result = reconcile_settings(&base, &json!({"backgroundColor": "chartreuse"}));
        assert_eq!(result.background_color, "#112233");
    }

    #[test]
    fn test_reconcile_mobile_layout_rejects_unknown() {
        let base = Settings {
            mobile_layout: MobileLayout::List,
            ..Settings::default()
        };
        assert_eq!(
            reconcile_settings(&base, &json!({"mobileLayout": "carousel"})).mobile_layout,
            MobileLayout::List
        );
        assert_eq!(
            reconcile_settings(&base, &json!({"mobileLayout": "grid"})).mobile_layout,
            MobileLayout::Grid
        );
    }

    #[test]
    fn test_reconcile_non_object_returns_normalized_base() {
        let base = Settings {
            overlay_opacity: 9.0,
            ..Settings::default()
        };
        let result = reconcile_settings(&base, &json!("garbage"));
        assert!((result.overlay_opacity - OVERLAY_OPACITY_MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reconcile_numeric_strings_accepted() {
        let base = Settings::default();
        let result = reconcile_settings(&base, &json!({"glassOpacity": "0.5"}));
        assert!((result.glass_opacity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitize_user_data_drops_invalid_custom_apps() {
        let base = UserData::default();
        let partial = json!({
            "customApps": [
                {"name": "Good", "url": "good.example.com"},
                {"name": "", "url": "https://nameless.example"},
                {"name": "No URL"},
                "not even an object"
            ]
        });
        let result = sanitize_user_data(&base, &partial);
        assert_eq!(result.custom_apps.len(), 1);
        assert_eq!(result.custom_apps[0].name, "Good");
        assert_eq!(result.custom_apps[0].url, "https://good.example.com/");
    }

    #[test]
    fn test_sanitize_user_data_partial_keeps_base_fields() {
        let base = UserData {
            hidden_app_ids: vec!["app-docs".to_string()],
            page_size: 24,
            ..UserData::default()
        };
        let result = sanitize_user_data(&base, &json!({"pageSize": 999}));
        assert_eq!(result.hidden_app_ids, vec!["app-docs"]);
        assert_eq!(result.page_size, crate::config::models::MAX_PAGE_SIZE);
    }

    #[test]
    fn test_sanitize_user_data_dedupes_hidden_ids() {
        let base = UserData::default();
        let partial = json!({"hiddenAppIds": ["a", " a ", "", "b", 3, "a"]});
        let result = sanitize_user_data(&base, &partial);
        assert_eq!(result.hidden_app_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_sanitize_user_data_non_object() {
        let base = UserData {
            page_size: 999,
            ..UserData::default()
        };
        let result = sanitize_user_data(&base, &json!(null));
        // Base is normalized even when the partial contributes nothing
        assert_eq!(result.page_size, crate::config::models::MAX_PAGE_SIZE);
    }
}
