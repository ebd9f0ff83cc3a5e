/// Analysis modules — post-scan selection over the match set.

pub mod recent;

pub use recent::{most_recent_on, most_recent_today, RecentFile};
