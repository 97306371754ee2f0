//! Identity resolver
//!
//! Assigns stable unique ids to app records. Ids are derived from the
//! record name (origin-prefixed slug) so the same input in the same order
//! always produces the same ids; collisions get `-2`, `-3`, … suffixes.

use crate::apps::record::{AppOrigin, AppRecord};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Slugify a name: Unicode-lowercase, alphanumeric runs joined by `-`
///
/// Returns an empty string when the name contains no alphanumeric
/// characters at all (e.g. `"★★★"`).
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Derive an id for a record that was supplied without one
///
/// Origin-prefixed slug of the name; when the name yields no slug
/// characters, falls back to an epoch-millisecond id.
pub fn derive_id(name: &str, origin: AppOrigin) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        format!("{}-{}", origin.id_prefix(), epoch_millis())
    } else {
        format!("{}-{}", origin.id_prefix(), slug)
    }
}

/// Resolve `base` against already-taken ids by appending `-2`, `-3`, …
pub fn uniquify(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 2u64;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Assign a unique id to every record, in input order
///
/// Records that already carry an id keep it unless it collides with an
/// earlier one; records without an id get a derived one. Processing in
/// input order makes the result deterministic for a given input order, and
/// a record's id stays stable across merges as long as its name and the
/// surrounding id set are unchanged.
pub fn ensure_unique_ids(records: Vec<AppRecord>) -> Vec<AppRecord> {
    let mut taken: HashSet<String> = HashSet::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());

    for mut record in records {
        let base = if record.id.trim().is_empty() {
            derive_id(&record.name, record.origin)
        } else {
            record.id.trim().to_string()
        };
        let id = uniquify(&base, &taken);
        taken.insert(id.clone());
        record.id = id;
        out.push(record);
    }

    out
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
