//! Record merger
//!
//! Combines catalog and custom records into one ordered collection and
//! prunes hidden-id bookkeeping against it. Both operations rebuild their
//! output from scratch on every call.

use crate::apps::identity::ensure_unique_ids;
use crate::apps::record::{AppOrigin, AppRecord};
use std::collections::HashSet;

/// Merge catalog and custom records into the canonical collection
///
/// When `hide_default_apps` is set the catalog contributes nothing;
/// otherwise catalog records precede custom records going into id
/// resolution. The result is sorted by case-insensitive name with ties
/// keeping the pre-sort order (stable sort), so the output is identical
/// for identical inputs.
pub fn merge_collection(
    catalog: &[AppRecord],
    custom: &[AppRecord],
    hide_default_apps: bool,
) -> Vec<AppRecord> {
    let mut combined = Vec::with_capacity(catalog.len() + custom.len());

    if !hide_default_apps {
        combined.extend(catalog.iter().cloned().map(|mut record| {
            record.origin = AppOrigin::Catalog;
            record
        }));
    }
    combined.extend(custom.iter().cloned().map(|mut record| {
        record.origin = AppOrigin::Custom;
        record
    }));

    let mut records = ensure_unique_ids(combined);
    records.sort_by_cached_key(|record| record.name.to_lowercase());
    records
}

/// Prune a hidden-id list against the merged collection
///
/// Trims entries, drops empties and duplicates (first occurrence wins),
/// and drops ids that no longer reference a record in `apps`. Run on every
/// merge so stale ids never accumulate.
pub fn dedupe_hidden_ids(ids: &[String], apps: &[AppRecord]) -> Vec<String> {
    let known: HashSet<&str> = apps.iter().map(|record| record.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    let mut out = Vec::new();

    for id in ids {
        let trimmed = id.trim();
        if trimmed.is_empty() || !known.contains(trimmed) || !seen.insert(trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }

    out
}
