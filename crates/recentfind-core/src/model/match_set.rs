/// Insertion-ordered collection of match records produced by a scan.
///
/// Records live in a flat `Vec<MatchRecord>` in the order they were first
/// seen. A side `HashMap` from `(directory, name)` to the record's position
/// keeps keys unique: recording the same pair twice updates the timestamp in
/// place and leaves the record where it was.
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Identity of a matched file: the directory it was found in and its base name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub dir: PathBuf,
    pub name: String,
}

impl MatchKey {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }
}

/// One matched file with its creation timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Directory containing the file.
    pub dir: PathBuf,
    /// Base name of the file.
    pub name: String,
    /// Creation time in the local timezone.
    pub created: DateTime<Local>,
}

impl MatchRecord {
    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.dir.clone(), self.name.clone())
    }

    /// Full path of the matched file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MatchSet {
    records: Vec<MatchRecord>,
    index: HashMap<MatchKey, usize>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a match. Returns `true` if the `(dir, name)` pair is new.
    pub fn insert(
        &mut self,
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
        created: DateTime<Local>,
    ) -> bool {
        let key = MatchKey::new(dir, name);
        if let Some(&pos) = self.index.get(&key) {
            self.records[pos].created = created;
            return false;
        }
        self.index.insert(key.clone(), self.records.len());
        self.records.push(MatchRecord {
            dir: key.dir,
            name: key.name,
            created,
        });
        true
    }

    /// Creation time recorded for `name` inside `dir`, if it matched.
    pub fn get(&self, dir: &Path, name: &str) -> Option<DateTime<Local>> {
        self.index
            .get(&MatchKey::new(dir, name))
            .map(|&pos| self.records[pos].created)
    }

    pub fn contains(&self, dir: &Path, name: &str) -> bool {
        self.get(dir, name).is_some()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
