//! View projector
//!
//! Derives the user-visible collection from the merged one: hidden-app
//! partition, search filtering, hidden-group injection, pagination, and
//! active-index navigation. Everything here is pure; the projection is
//! rebuilt for every render.

use crate::apps::record::{AppRecord, Tile};
use std::collections::HashSet;

/// Partition the collection into (visible, hidden) in one ordered pass
pub fn split_by_hidden(
    apps: &[AppRecord],
    hidden_ids: &[String],
) -> (Vec<AppRecord>, Vec<AppRecord>) {
    let hidden: HashSet<&str> = hidden_ids.iter().map(String::as_str).collect();
    apps.iter()
        .cloned()
        .partition(|record| !hidden.contains(record.id.as_str()))
}

/// Filter apps by a search term
///
/// A blank term returns everything. Otherwise a case-insensitive substring
/// match against name, description, and the joined tag list; a hit in any
/// one field keeps the record.
pub fn filter_apps(apps: &[AppRecord], term: &str) -> Vec<AppRecord> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return apps.to_vec();
    }
    apps.iter()
        .filter(|record| {
            record.name.to_lowercase().contains(&needle)
                || record.description.to_lowercase().contains(&needle)
                || record.tags.join(" ").to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Number of logical pages for a tile count
///
/// Mobile layout scrolls continuously and is always exactly one page.
/// Desktop is `ceil(count / page_size)` with a minimum of one page even
/// when the collection is empty.
pub fn total_pages(count: usize, mobile: bool, page_size: u32) -> usize {
    if mobile {
        return 1;
    }
    let size = page_size.max(1) as usize;
    count.div_ceil(size).max(1)
}

/// Clamp the current page index into `[0, total_pages - 1]`
///
/// Applied whenever `total_pages` shrinks, e.g. after a search narrows the
/// result set.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages.saturating_sub(1))
}

/// Step the active tile index by `delta`, wrapping modulo `count`
///
/// `None` is the "no selection" state: a forward step from it selects the
/// first tile and a backward step selects the last. An empty collection
/// stays unselected.
#[expect(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    reason = "tile counts are far below isize::MAX and rem_euclid output is non-negative"
)]
pub fn advance(current: Option<usize>, delta: isize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let next = match current {
        None => {
            if delta >= 0 {
                0
            } else {
                count - 1
            }
        }
        Some(index) => ((index as isize + delta).rem_euclid(count as isize)) as usize,
    };
    Some(next)
}

/// One render's worth of derived view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewProjection {
    /// All tiles in display order (every page), hidden-group last
    pub tiles: Vec<Tile>,
    /// The hidden partition, order preserved
    pub hidden: Vec<AppRecord>,
    /// Current page index, already clamped
    pub page: usize,
    /// Total logical pages, always at least 1
    pub total_pages: usize,
    /// Number of app tiles that matched the search term
    pub matches: usize,
}

impl ViewProjection {
    /// Tiles on the current page (mobile layout gets everything)
    pub fn page_tiles(&self, mobile: bool, page_size: u32) -> &[Tile] {
        if mobile {
            return &self.tiles;
        }
        let size = page_size.max(1) as usize;
        let start = self.page * size;
        let end = (start + size).min(self.tiles.len());
        if start >= self.tiles.len() {
            &[]
        } else {
            &self.tiles[start..end]
        }
    }
}

/// Compose one render pass: partition, filter, inject, paginate
///
/// The hidden-group tile appears only when the search term is blank and at
/// least one app is hidden; it occupies a grid cell (and so counts toward
/// `total_pages`) but is never a search result.
pub fn project(
    apps: &[AppRecord],
    hidden_ids: &[String],
    term: &str,
    page: usize,
    mobile: bool,
    page_size: u32,
) -> ViewProjection {
    let (visible, hidden) = split_by_hidden(apps, hidden_ids);
    let matched = filter_apps(&visible, term);
    let matches = matched.len();

    let mut tiles: Vec<Tile> = matched.into_iter().map(Tile::App).collect();
    if term.trim().is_empty() && !hidden.is_empty() {
        tiles.push(Tile::HiddenGroup {
            count: hidden.len(),
        });
    }

    let total = total_pages(tiles.len(), mobile, page_size);
    ViewProjection {
        page: clamp_page(page, total),
        total_pages: total,
        matches,
        tiles,
        hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::record::AppOrigin;

    fn record(id: &str, name: &str, description: &str, tags: &[&str]) -> AppRecord {
        AppRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            url: String::new(),
            icon: String::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            origin: AppOrigin::Catalog,
        }
    }

    fn sample() -> Vec<AppRecord> {
        vec![
            record("app-docs", "Docs", "Team documentation", &["reference"]),
            record("app-mail", "Mail", "Webmail client", &["communication"]),
            record("app-music", "Music", "Streaming", &["media", "audio"]),
        ]
    }

    #[test]
    fn test_split_by_hidden_preserves_order() {
        let apps = sample();
        let (visible, hidden) = split_by_hidden(&apps, &["app-mail".to_string()]);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, "app-docs");
        assert_eq!(visible[1].id, "app-music");
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].id, "app-mail");
    }

    #[test]
    fn test_filter_blank_term_returns_all() {
        let apps = sample();
        assert_eq!(filter_apps(&apps, "").len(), 3);
        assert_eq!(filter_apps(&apps, "   ").len(), 3);
    }

    #[test]
    fn test_filter_matches_name_description_and_tags() {
        let apps = sample();
        assert_eq!(filter_apps(&apps, "DOCS")[0].id, "app-docs");
        assert_eq!(filter_apps(&apps, "webmail")[0].id, "app-mail");
        assert_eq!(filter_apps(&apps, "audio")[0].id, "app-music");
        assert!(filter_apps(&apps, "nothing matches this").is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, false, 16), 1);
        assert_eq!(total_pages(16, false, 16), 1);
        assert_eq!(total_pages(17, false, 16), 2);
        assert_eq!(total_pages(33, false, 16), 3);
        // Mobile is always a single logical page
        assert_eq!(total_pages(500, true, 16), 1);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 2), 1);
        assert_eq!(clamp_page(0, 1), 0);
        assert_eq!(clamp_page(3, 0), 0);
    }

    #[test]
    fn test_advance_wraps_both_directions() {
        assert_eq!(advance(Some(0), 1, 3), Some(1));
        assert_eq!(advance(Some(2), 1, 3), Some(0));
        assert_eq!(advance(Some(0), -1, 3), Some(2));
        assert_eq!(advance(None, 1, 3), Some(0));
        assert_eq!(advance(None, -1, 3), Some(2));
        assert_eq!(advance(None, 1, 0), None);
        assert_eq!(advance(Some(1), 1, 0), None);
    }

    #[test]
    fn test_hidden_group_injected_only_without_search() {
        let apps = sample();
        let hidden = vec!["app-mail".to_string()];

        let idle = project(&apps, &hidden, "", 0, false, 16);
        assert_eq!(idle.tiles.len(), 3); // 2 visible + hidden group
        assert!(matches!(idle.tiles.last(), Some(Tile::HiddenGroup { count: 1 })));

        let searching = project(&apps, &hidden, "docs", 0, false, 16);
        assert_eq!(searching.tiles.len(), 1);
        assert!(matches!(searching.tiles[0], Tile::App(_)));
    }

    #[test]
    fn test_hidden_group_counts_toward_pages() {
        // 4 visible apps + hidden group = 5 tiles; page size 4 => 2 pages
        let apps: Vec<AppRecord> = (0..5)
            .map(|i| record(&format!("app-{i}"), &format!("App {i}"), "", &[]))
            .collect();
        let hidden = vec!["app-4".to_string()];
        let view = project(&apps, &hidden, "", 0, false, 4);
        assert_eq!(view.tiles.len(), 5);
        assert_eq!(view.total_pages, 2);
    }

    #[test]
    fn test_page_clamps_when_search_shrinks_results() {
        let apps: Vec<AppRecord> = (0..20)
            .map(|i| record(&format!("app-{i}"), &format!("App {i}"), "", &[]))
            .collect();
        let view = project(&apps, &[], "App 7", 4, false, 8);
        assert_eq!(view.matches, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 0);
    }

    #[test]
    fn test_page_tiles_slicing() {
        let apps: Vec<AppRecord> = (0..10)
            .map(|i| record(&format!("app-{i}"), &format!("App {i}"), "", &[]))
            .collect();
        let view = project(&apps, &[], "", 1, false, 4);
        assert_eq!(view.page_tiles(false, 4).len(), 4);
        assert_eq!(view.page_tiles(true, 4).len(), 10);

        let last = project(&apps, &[], "", 2, false, 4);
        assert_eq!(last.page_tiles(false, 4).len(), 2);
    }

    // Property-based tests using proptest
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: desktop total_pages is always >= 1 and equals ceil(count/page_size)
            #[test]
            fn pagination_bound(count in 0usize..10_000, page_size in 1u32..64) {
                let total = total_pages(count, false, page_size);
                prop_assert!(total >= 1);
                if count > 0 {
                    prop_assert_eq!(total, count.div_ceil(page_size as usize));
                }
            }

            /// Property: advance always lands in [0, count) for non-empty collections
            #[test]
            fn advance_stays_in_bounds(
                current in prop::option::of(0usize..100),
                delta in -200isize..200,
                count in 1usize..100
            ) {
                let current = current.map(|c| c % count);
                let next = advance(current, delta, count);
                prop_assert!(next.is_some());
                prop_assert!(next.unwrap() < count);
            }

            /// Property: partition never loses or duplicates a record
            #[test]
            fn split_is_a_partition(
                ids in prop::collection::hash_set("[a-z]{1,6}", 0..20),
                hidden in prop::collection::vec("[a-z]{1,6}", 0..10)
            ) {
                let apps: Vec<AppRecord> =
                    ids.iter().map(|id| record(id, id, "", &[])).collect();
                let (visible, hidden_part) = split_by_hidden(&apps, &hidden);
                prop_assert_eq!(visible.len() + hidden_part.len(), apps.len());
            }
        }
    }
}
