//! App collection: records, identity, merging, and view projection
//!
//! The collection is rebuilt from scratch on every change (catalog refresh,
//! custom-app edit, hide-flag toggle) rather than patched incrementally,
//! trading recomputation cost for the elimination of merge-drift bugs.

pub mod identity;
pub mod merge;
pub mod record;
pub mod view;

pub use identity::ensure_unique_ids;
pub use merge::{dedupe_hidden_ids, merge_collection};
pub use record::{AppOrigin, AppRecord, CustomAppDraft, Tile};
pub use view::ViewProjection;
