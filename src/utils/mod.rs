//! Utility modules
//!
//! Provides logging initialization with startup rotation and the
//! page-title lookup used to pre-fill the name field when adding an app.

pub mod logging;
pub mod title_lookup;

pub use logging::init_logging;
pub use title_lookup::resolve_title;
