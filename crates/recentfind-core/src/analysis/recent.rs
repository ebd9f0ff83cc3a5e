/// Newest-file selection over a completed scan.
use crate::model::MatchSet;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;

/// The most recently created match, reported only when it was created on
/// the reference day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecentFile {
    pub name: String,
    pub path: PathBuf,
    pub date: DateTime<Local>,
}

/// Return the newest record in `matches` if its local creation date is `day`.
///
/// Only a strictly greater timestamp replaces the current candidate, so when
/// several records share the maximum the earliest-inserted one wins.
pub fn most_recent_on(matches: &MatchSet, day: NaiveDate) -> Option<RecentFile> {
    let mut newest = matches.iter().next()?;
    for record in matches.iter().skip(1) {
        if record.created > newest.created {
            newest = record;
        }
    }

    if newest.created.date_naive() != day {
        return None;
    }

    Some(RecentFile {
        name: newest.name.clone(),
        path: newest.dir.clone(),
        date: newest.created,
    })
}

/// [`most_recent_on`] for the current local date.
pub fn most_recent_today(matches: &MatchSet) -> Option<RecentFile> {
    most_recent_on(matches, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn at(d: NaiveDate, hour: u32, min: u32) -> DateTime<Local> {
        Local
            .from_local_datetime(&d.and_hms_opt(hour, min, 0).unwrap())
            .earliest()
            .unwrap()
    }

    #[test]
    fn empty_set_has_no_recent_file() {
        assert_eq!(most_recent_on(&MatchSet::new(), day()), None);
        assert_eq!(most_recent_today(&MatchSet::new()), None);
    }

    #[test]
    fn newest_record_created_on_day_is_returned() {
        let mut set = MatchSet::new();
        set.insert("/dl", "old.log", at(day(), 8, 0));
        set.insert("/dl", "new.log", at(day(), 17, 30));
        set.insert("/cwd", "mid.log", at(day(), 12, 0));

        let recent = most_recent_on(&set, day()).expect("a file from today");
        assert_eq!(recent.name, "new.log");
        assert_eq!(recent.path, PathBuf::from("/dl"));
        assert_eq!(recent.date, at(day(), 17, 30));
    }

    /// If the newest match is from the previous day, nothing is reported,
    /// even though older matches exist.
    #[test]
    fn newest_record_from_yesterday_yields_none() {
        let yesterday = day() - Duration::days(1);
        let mut set = MatchSet::new();
        set.insert("/dl", "a.log", at(yesterday, 9, 0));
        set.insert("/dl", "b.log", at(yesterday, 23, 59));

        assert_eq!(most_recent_on(&set, day()), None);
        assert!(most_recent_on(&set, yesterday).is_some());
    }

    /// Selection looks at the single newest record only: an older record
    /// that happens to be from the reference day does not qualify.
    #[test]
    fn only_the_overall_newest_is_considered() {
        let tomorrow = day() + Duration::days(1);
        let mut set = MatchSet::new();
        set.insert("/dl", "today.log", at(day(), 10, 0));
        set.insert("/dl", "tomorrow.log", at(tomorrow, 1, 0));

        assert_eq!(most_recent_on(&set, day()), None);
    }

    #[test]
    fn ties_resolve_to_first_inserted() {
        let t = at(day(), 11, 11);
        let mut set = MatchSet::new();
        set.insert("/first", "same.log", t);
        set.insert("/second", "same.log", t);

        let recent = most_recent_on(&set, day()).unwrap();
        assert_eq!(recent.path, PathBuf::from("/first"));
    }
}
