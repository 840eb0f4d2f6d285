//! Domain models for colloscope schedules.
//!
//! This module provides the core data structures that represent a colloscope:
//! the sessions each group attends week after week, and the holiday breaks that
//! interrupt the rotation.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::time::{format_hour_label, Locale};

/// Day of a session. Sessions run Monday through Saturday only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Parse a weekday label, in French or English, ignoring case and surrounding spaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use colloscope_engine::core::domain::Weekday;
    ///
    /// assert_eq!(Weekday::from_label("Mercredi"), Some(Weekday::Wednesday));
    /// assert_eq!(Weekday::from_label("SATURDAY"), Some(Weekday::Saturday));
    /// assert_eq!(Weekday::from_label("dimanche"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.french_name() == normalized || day.english_name() == normalized)
    }

    /// Days between the week anchor (Monday) and this day.
    pub fn offset_days(self) -> i64 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    pub fn french_name(self) -> &'static str {
        match self {
            Weekday::Monday => "lundi",
            Weekday::Tuesday => "mardi",
            Weekday::Wednesday => "mercredi",
            Weekday::Thursday => "jeudi",
            Weekday::Friday => "vendredi",
            Weekday::Saturday => "samedi",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("'{}' is not a session weekday", s))
    }
}

/// One scheduled session: a group meets a professor for a subject in a room.
///
/// The `date` is always derived from the week anchor plus the weekday offset,
/// so two entries sharing `(week, weekday)` always share the same `date`.
///
/// # Examples
///
/// ```
/// use colloscope_engine::core::domain::{ScheduleEntry, Weekday};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let entry = ScheduleEntry::new(
///     "3",
///     "English",
///     "Mme Jane",
///     "E12",
///     Weekday::Wednesday,
///     NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
/// );
/// assert_eq!(entry.date, NaiveDate::from_ymd_opt(2023, 9, 6).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub group: String,
    pub subject: String,
    pub professor: String,
    pub classroom: String,
    pub weekday: Weekday,
    pub time: NaiveTime,
    /// Week anchor the session was read from.
    pub week: NaiveDate,
    pub date: NaiveDate,
}

impl ScheduleEntry {
    pub fn new(
        group: impl Into<String>,
        subject: impl Into<String>,
        professor: impl Into<String>,
        classroom: impl Into<String>,
        weekday: Weekday,
        time: NaiveTime,
        week: NaiveDate,
    ) -> Self {
        Self {
            group: group.into(),
            subject: subject.into(),
            professor: professor.into(),
            classroom: classroom.into(),
            weekday,
            time,
            week,
            date: week + Duration::days(weekday.offset_days()),
        }
    }

    /// Day-first date with a 4-digit year, `DD/MM/YYYY`.
    pub fn short_date(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    /// Start time as written in the source table, `HHhMM`.
    pub fn hour_label(&self) -> String {
        format_hour_label(self.time)
    }

    /// Long-form date such as `mercredi 6 septembre`.
    pub fn long_date(&self, locale: Locale) -> String {
        locale.long_date(self.weekday, self.date)
    }
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Le {}, passe le groupe {} en {} avec {} à {}",
            self.short_date(),
            self.group,
            self.classroom,
            self.professor,
            self.hour_label()
        )
    }
}

/// First day of a holiday break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolidayMarker {
    pub date: NaiveDate,
}

impl HolidayMarker {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

/// A parsed colloscope for one class: its sessions in source row order and its
/// holiday breaks in source column order.
///
/// A `Colloscope` is never mutated after construction; a reload builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colloscope {
    entries: Vec<ScheduleEntry>,
    holidays: Vec<HolidayMarker>,
}

impl Colloscope {
    pub fn new(entries: Vec<ScheduleEntry>, holidays: Vec<HolidayMarker>) -> Self {
        Self { entries, holidays }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn holidays(&self) -> &[HolidayMarker] {
        &self.holidays
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unique group identifiers, sorted.
    pub fn groups(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.group.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unique week anchors, sorted.
    pub fn weeks(&self) -> Vec<NaiveDate> {
        self.entries
            .iter()
            .map(|entry| entry.week)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
