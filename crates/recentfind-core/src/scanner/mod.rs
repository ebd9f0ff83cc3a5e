/// Scanner module — walks the search roots and records matching files.
///
/// Roots are walked one at a time, in the order given, with `jwalk` running
/// serially and sorting each directory's entries so the resulting record
/// order is reproducible from run to run.
///
/// Anything that goes wrong below a root (missing directory, access denied,
/// a file vanishing between listing and `stat`) is logged and skipped. One
/// unreadable root never aborts the scan of the others.
pub mod pattern;

use crate::model::MatchSet;
use chrono::{DateTime, Local};
use pattern::NamePattern;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Counters describing one completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Roots that existed and were walked.
    pub roots_walked: u64,
    /// Roots skipped because they were empty, missing or not directories.
    pub roots_skipped: u64,
    /// Entries yielded by the walker, directories included.
    pub entries_visited: u64,
    /// Distinct `(directory, name)` pairs recorded.
    pub files_matched: u64,
    /// Entries that could not be read or stat'ed.
    pub error_count: u64,
    pub duration: Duration,
}

/// Walk every root in order and record each file whose name fully matches
/// `pattern` into `matches`.
///
/// `matches` is not cleared here; the caller owns the scan lifecycle.
pub fn scan_roots(roots: &[PathBuf], pattern: &NamePattern, matches: &mut MatchSet) -> ScanSummary {
    let start = Instant::now();
    let mut summary = ScanSummary::default();

    info!(
        "Scanning {} root(s) for `{}`",
        roots.len(),
        pattern.as_str()
    );

    for root in roots {
        if root.as_os_str().is_empty() {
            summary.roots_skipped += 1;
            continue;
        }
        if !root.is_dir() {
            warn!("Search root {} is not an accessible directory", root.display());
            summary.roots_skipped += 1;
            continue;
        }
        summary.roots_walked += 1;
        let walk_root = resolve_root(root);
        scan_root(&walk_root, pattern, matches, &mut summary);
    }

    summary.duration = start.elapsed();
    info!(
        "Scan complete: {} match(es) from {} entries in {:?} ({} error(s))",
        summary.files_matched, summary.entries_visited, summary.duration, summary.error_count
    );
    summary
}

/// The walker does not descend into a symlinked root, so a root that is
/// itself a link (macOS `/tmp`, for one) is walked at its target.
fn resolve_root(root: &Path) -> PathBuf {
    let is_link = std::fs::symlink_metadata(root)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return root.to_path_buf();
    }
    match std::fs::canonicalize(root) {
        Ok(target) => {
            debug!("Root {} resolves to {}", root.display(), target.display());
            target
        }
        Err(_) => root.to_path_buf(),
    }
}

fn scan_root(root: &Path, pattern: &NamePattern, matches: &mut MatchSet, summary: &mut ScanSummary) {
    debug!("Walking {}", root.display());

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                summary.error_count += 1;
                debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        let path = entry.path();

        // The root itself is not a candidate.
        if path == root {
            continue;
        }
        summary.entries_visited += 1;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        // A link to a directory counts as a directory but is not descended.
        // Dangling links stay candidates and fail at the timestamp step.
        if file_type.is_symlink() && is_dir_target(&path) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !pattern.is_match(&file_name) {
            continue;
        }

        let parent = match path.parent() {
            Some(p) => p.to_path_buf(),
            None => continue,
        };

        let created = match creation_time(&path) {
            Some(t) => t,
            None => {
                summary.error_count += 1;
                debug!("Cannot read creation time of {}", path.display());
                continue;
            }
        };

        if matches.insert(parent, file_name.into_owned(), created) {
            summary.files_matched += 1;
        }
    }
}

/// Whether `path` resolves to a directory, following symlinks.
pub(crate) fn is_dir_target(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Creation time of `path` in local time.
///
/// Falls back to the modification time on filesystems that do not record a
/// birth time. Symlinks are followed; a dangling link yields `None`.
pub fn creation_time(path: &Path) -> Option<DateTime<Local>> {
    let meta = std::fs::metadata(path).ok()?;
    let stamp = meta.created().or_else(|_| meta.modified()).ok()?;
    Some(DateTime::<Local>::from(stamp))
}
