/// Search engine — owns the search roots, runs scans, holds the results.
///
/// Roots are searched in a fixed order: the downloads folder, then the
/// user-added extra directories in the order they were added, then the
/// process's current working directory. Only the extra directories are
/// stored on the engine; the downloads path comes from the settings store
/// and the working directory is read at the moment it is needed.
///
/// # Lifecycle
///
/// ```text
/// Unscanned ──scan() Ok──▶ Scanned ──scan()──▶ Scanned | Unscanned (on NoMatchFound)
/// ```
///
/// Every `scan()` clears the previous results before walking, so a failed
/// scan leaves the engine with no matches.
use crate::analysis::recent::{self, RecentFile};
use crate::error::{Result, SearchError};
use crate::model::MatchSet;
use crate::platform::{FolderLocator, HomeDownloadsLocator};
use crate::scanner::pattern::NamePattern;
use crate::scanner::{self, ScanSummary};
use crate::settings::{split_unique, IniSettings, SettingsKey, SettingsStore};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default separator between entries of the stored extra-directory list.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Default text encoding of the settings file.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Construction options for [`SearchEngine::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Joins and splits the extra-directory list in the settings file.
    pub separator: String,
    /// Encoding label for the settings file (e.g. `UTF-8`, `windows-1251`).
    pub encoding: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

pub struct SearchEngine<S: SettingsStore = IniSettings> {
    pattern: NamePattern,
    settings: S,
    separator: String,
    downloads: String,
    extra_dirs: Vec<String>,
    matches: MatchSet,
}

impl SearchEngine<IniSettings> {
    /// Open an engine backed by the INI settings file at `settings_path`.
    ///
    /// If the file does not exist it is created, with the downloads folder
    /// found under the user's home directory (or an empty value) and an
    /// empty extra-directory list.
    pub fn open(
        pattern: &str,
        settings_path: impl Into<PathBuf>,
        options: EngineOptions,
    ) -> Result<Self> {
        let store = IniSettings::new(settings_path, &options.encoding)?;
        Self::with_store(pattern, store, &HomeDownloadsLocator, options.separator)
    }
}

impl<S: SettingsStore> SearchEngine<S> {
    /// Build an engine over any settings store, consulting `locator` only if
    /// the store has to be created.
    pub fn with_store(
        pattern: &str,
        mut settings: S,
        locator: &dyn FolderLocator,
        separator: impl Into<String>,
    ) -> Result<Self> {
        let pattern = NamePattern::new(pattern)?;
        let separator = separator.into();

        if !settings.exists() {
            let downloads = locator
                .locate()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("No settings found; default folder is {downloads:?}");
            settings.initialise(&downloads, "")?;
        }

        let downloads = settings.get(SettingsKey::Downloads)?;
        let extra_dirs = split_unique(&settings.get(SettingsKey::ExtraDirectories)?, &separator);
        info!(
            "Loaded settings: downloads {downloads:?}, {} extra director(ies)",
            extra_dirs.len()
        );

        Ok(Self {
            pattern,
            settings,
            separator,
            downloads,
            extra_dirs,
            matches: MatchSet::new(),
        })
    }

    /// Walk every root and rebuild the match set.
    ///
    /// Fails with [`SearchError::NoMatchFound`] if nothing matched; the
    /// previous results are gone either way.
    pub fn scan(&mut self) -> Result<ScanSummary> {
        self.matches.clear();
        let roots = self.root_directories();
        let summary = scanner::scan_roots(&roots, &self.pattern, &mut self.matches);

        if self.matches.is_empty() {
            return Err(SearchError::NoMatchFound {
                pattern: self.pattern.as_str().to_string(),
            });
        }
        Ok(summary)
    }

    /// The newest match, if it was created today (local time).
    ///
    /// `None` before any successful scan.
    pub fn most_recent_today(&self) -> Option<RecentFile> {
        recent::most_recent_today(&self.matches)
    }

    /// The newest match, if it was created on `day`.
    pub fn most_recent_on(&self, day: NaiveDate) -> Option<RecentFile> {
        recent::most_recent_on(&self.matches, day)
    }

    /// Search roots in scan order: downloads, extras, current directory.
    ///
    /// The downloads entry is omitted, not returned as an empty path, when
    /// no downloads folder is configured; the list then starts with the
    /// extra directories. The working directory is read on every call.
    pub fn root_directories(&self) -> Vec<PathBuf> {
        let mut roots = Vec::with_capacity(self.extra_dirs.len() + 2);
        if !self.downloads.is_empty() {
            roots.push(PathBuf::from(&self.downloads));
        }
        roots.extend(self.extra_dirs.iter().map(PathBuf::from));
        match std::env::current_dir() {
            Ok(cwd) => roots.push(cwd),
            Err(err) => warn!("Cannot read current directory: {err}"),
        }
        roots
    }

    /// Register an extra search root and persist the updated list.
    ///
    /// Returns `false` without touching the settings if `path` is already
    /// registered.
    pub fn add_directory(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(SearchError::InvalidDirectory {
                path: path.to_path_buf(),
            });
        }

        let entry = path.to_string_lossy().into_owned();
        if self.extra_dirs.contains(&entry) {
            return Ok(false);
        }

        let mut updated = self.extra_dirs.clone();
        updated.push(entry);
        self.settings
            .set(SettingsKey::ExtraDirectories, &updated.join(&self.separator))?;
        self.extra_dirs = updated;

        info!("Added search directory {}", path.display());
        Ok(true)
    }

    /// Snapshot of the results of the last scan.
    pub fn matches(&self) -> MatchSet {
        self.matches.clone()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Stored downloads path; empty if none was found at creation.
    pub fn downloads(&self) -> &str {
        &self.downloads
    }

    pub fn extra_directories(&self) -> &[String] {
        &self.extra_dirs
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }
}
