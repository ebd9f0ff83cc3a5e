/// recentfind core — finds the newest file created today whose name matches
/// a pattern, across a small ordered set of search roots.
///
/// This crate contains all search logic with no front-end dependencies.
///
/// # Modules
///
/// - [`engine`] — `SearchEngine`: search roots, scans, results.
/// - [`scanner`] — Ordered multi-root walk and full-name pattern matching.
/// - [`model`] — Insertion-ordered match records.
/// - [`analysis`] — "Most recent file created today" selection.
/// - [`settings`] — Persisted search roots (INI file with configurable encoding).
/// - [`platform`] — Default downloads-folder discovery.
/// - [`error`] — Error types.
pub mod analysis;
pub mod engine;
pub mod error;
pub mod model;
pub mod platform;
pub mod scanner;
pub mod settings;

pub use analysis::RecentFile;
pub use engine::{EngineOptions, SearchEngine};
pub use error::{SearchError, SettingsError};
pub use model::{MatchRecord, MatchSet};
pub use scanner::ScanSummary;
