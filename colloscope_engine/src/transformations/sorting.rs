use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::ScheduleEntry;

/// Ordering applied to schedule entries before export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Calendar date; entries on the same date keep their input order.
    #[default]
    ByTime,
    ByProfessor,
    ByGroup,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::ByTime => "by-time",
            SortKey::ByProfessor => "by-professor",
            SortKey::ByGroup => "by-group",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "by-time" | "time" | "temps" => Ok(SortKey::ByTime),
            "by-professor" | "professor" | "prof" => Ok(SortKey::ByProfessor),
            "by-group" | "group" | "groupe" => Ok(SortKey::ByGroup),
            other => Err(format!(
                "Invalid sort key: {}. Must be 'by-time', 'by-professor' or 'by-group'",
                other
            )),
        }
    }
}

/// Return `entries` ordered by `key`. The sort is stable for every key.
///
/// # Example
///
/// ```
/// use colloscope_engine::core::domain::{ScheduleEntry, Weekday};
/// use colloscope_engine::transformations::{sort_entries, SortKey};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let week = NaiveDate::from_ymd_opt(2023, 9, 4).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let entries = vec![
///     ScheduleEntry::new("2", "Maths", "M. X", "B204", Weekday::Friday, noon, week),
///     ScheduleEntry::new("1", "English", "Mme Jane", "E12", Weekday::Monday, noon, week),
/// ];
///
/// let sorted = sort_entries(&entries, SortKey::ByTime);
/// assert_eq!(sorted[0].group, "1");
/// ```
pub fn sort_entries(entries: &[ScheduleEntry], key: SortKey) -> Vec<ScheduleEntry> {
    let mut sorted = entries.to_vec();
    match key {
        SortKey::ByTime => sorted.sort_by_key(|entry| entry.date),
        SortKey::ByProfessor => sorted.sort_by(|a, b| a.professor.cmp(&b.professor)),
        SortKey::ByGroup => sorted.sort_by(|a, b| a.group.cmp(&b.group)),
    }
    sorted
}
