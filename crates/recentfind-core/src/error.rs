/// Error types for the search engine and its settings store.
///
/// Every failure a caller is expected to act on has its own variant so a
/// front end can turn it into a targeted message instead of a generic one.
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by [`crate::engine::SearchEngine`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// A full scan of every root produced no matching file.
    #[error("no file matching `{pattern}` was found in any search directory")]
    NoMatchFound { pattern: String },

    /// `add_directory` was given something that is not an existing directory.
    #[error("not a directory: {}", path.display())]
    InvalidDirectory { path: PathBuf },

    /// The file-name pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Failures raised while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("settings file {} has no [{section}] section", path.display())]
    MissingSection { path: PathBuf, section: String },

    #[error("settings file {} has no `{key}` entry", path.display())]
    MissingKey { path: PathBuf, key: String },

    #[error("unknown text encoding `{0}`")]
    UnknownEncoding(String),

    #[error("settings file {} is not valid {encoding}", path.display())]
    Decode { path: PathBuf, encoding: String },

    #[error("settings for {} cannot be represented in {encoding}", path.display())]
    Encode { path: PathBuf, encoding: String },
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
