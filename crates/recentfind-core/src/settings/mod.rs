/// Settings store — persisted search roots.
///
/// The engine only needs to read and write two string values, so it talks
/// to a small [`SettingsStore`] trait. [`IniSettings`] is the file-backed
/// implementation used in production.
pub mod ini_file;

use crate::error::SettingsError;

pub use ini_file::IniSettings;

/// Name of the section holding every search-root key.
pub const SECTION: &str = "Paths";

/// The keys the engine reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingsKey {
    /// Path of the downloads-equivalent folder (may be empty).
    Downloads,
    /// User-added directories joined by the configured separator.
    ExtraDirectories,
}

impl SettingsKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Downloads => "downloads",
            Self::ExtraDirectories => "extra directories",
        }
    }
}

/// Durable key-value storage for the engine's configuration.
pub trait SettingsStore {
    /// Whether the backing storage already exists.
    fn exists(&self) -> bool;

    /// Create fresh storage holding both keys.
    fn initialise(&mut self, downloads: &str, extra_directories: &str) -> Result<(), SettingsError>;

    fn get(&self, key: SettingsKey) -> Result<String, SettingsError>;

    /// Rewrite one key, preserving every other stored value.
    fn set(&mut self, key: SettingsKey, value: &str) -> Result<(), SettingsError>;
}

/// Split a stored list on `separator`, dropping duplicates but keeping the
/// first occurrence of each entry in place. An empty value is an empty list.
pub fn split_unique(value: &str, separator: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return vec![value.to_string()];
    }
    let mut out: Vec<String> = Vec::new();
    for part in value.split(separator) {
        if !out.iter().any(|seen| seen == part) {
            out.push(part.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_empty_list() {
        assert!(split_unique("", "\n").is_empty());
    }

    #[test]
    fn duplicates_removed_first_occurrence_kept() {
        let dirs = split_unique("/b\n/a\n/b\n/c\n/a", "\n");
        assert_eq!(dirs, ["/b", "/a", "/c"]);
    }

    #[test]
    fn custom_separator() {
        assert_eq!(split_unique("/x;/y;/x", ";"), ["/x", "/y"]);
    }

    #[test]
    fn key_names_are_stable() {
        assert_eq!(SettingsKey::Downloads.as_str(), "downloads");
        assert_eq!(SettingsKey::ExtraDirectories.as_str(), "extra directories");
    }
}
