/// Platform-specific functionality — default search-root discovery.

pub mod downloads;

pub use downloads::{find_downloads_under, FolderLocator, HomeDownloadsLocator};
