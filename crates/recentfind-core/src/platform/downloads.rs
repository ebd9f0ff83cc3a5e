/// Downloads-folder discovery.
///
/// Walks the current user's home directory (`C:\Users\<user>` on Windows,
/// `/home/<user>` on Linux, `/Users/<user>` on macOS) for the first
/// directory named `Downloads` or its Russian localisation `Загрузки`.
use crate::scanner::is_dir_target;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Directory names accepted as the downloads folder.
pub const DOWNLOADS_NAMES: [&str; 2] = ["Downloads", "Загрузки"];

/// Source of the default search root.
pub trait FolderLocator {
    /// Absolute path of the default folder, or `None` if there is none.
    fn locate(&self) -> Option<PathBuf>;
}

/// Locates the downloads folder under the user's home directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeDownloadsLocator;

impl FolderLocator for HomeDownloadsLocator {
    fn locate(&self) -> Option<PathBuf> {
        // Read on every call; the home directory is process-global state.
        let home = dirs::home_dir()?;
        find_downloads_under(&home)
    }
}

/// Top-down search below `start` for a directory named in
/// [`DOWNLOADS_NAMES`].
///
/// Each directory's full child list is checked before any child is
/// descended into, so `~/Downloads` wins over `~/.cache/app/Downloads`.
/// Siblings are visited in sorted order. A symlink to a directory counts as
/// a hit but is never descended into. Unreadable directories are skipped.
pub fn find_downloads_under(start: &Path) -> Option<PathBuf> {
    let found: Arc<Mutex<Option<PathBuf>>> = Arc::new(Mutex::new(None));
    let slot = found.clone();

    let walker = jwalk::WalkDir::new(start)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial)
        .process_read_dir(move |_depth, _dir, _state, children| {
            let Ok(mut hit) = slot.lock() else {
                return;
            };
            if hit.is_none() {
                let mut candidates: Vec<PathBuf> = children
                    .iter()
                    .flatten()
                    .filter(|child| is_downloads_name(&child.file_name().to_string_lossy()))
                    .map(|child| child.path())
                    .filter(|path| is_dir_target(path))
                    .collect();
                candidates.sort();
                *hit = candidates.into_iter().next();
            }
            // Nothing left to find below this point.
            if hit.is_some() {
                for child in children.iter_mut().flatten() {
                    child.read_children_path = None;
                }
            }
        });

    for entry in walker {
        if let Err(err) = entry {
            debug!("Skipping unreadable directory: {err}");
        }
        if found.lock().map(|hit| hit.is_some()).unwrap_or(false) {
            break;
        }
    }

    let hit = found.lock().ok().and_then(|mut hit| hit.take());
    match &hit {
        Some(path) => debug!("Found downloads folder at {}", path.display()),
        None => debug!("No downloads folder below {}", start.display()),
    }
    hit
}

fn is_downloads_name(name: &str) -> bool {
    DOWNLOADS_NAMES.contains(&name)
}
