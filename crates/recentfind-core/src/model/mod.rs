/// Data model — match records and the insertion-ordered set that holds them.

pub mod match_set;

pub use match_set::{MatchKey, MatchRecord, MatchSet};
