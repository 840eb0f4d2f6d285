//! Data-quality checks over a parsed colloscope.
//!
//! Nothing reported here stops a colloscope from being used: the parser has
//! already rejected malformed sources. The validator points out things an
//! operator probably wants to fix in the source table.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday as CalendarWeekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::core::domain::Colloscope;

/// Warnings plus summary statistics for one colloscope.
///
/// # Examples
///
/// ```
/// use colloscope_engine::preprocessing::validator::ValidationReport;
///
/// let mut report = ValidationReport::new();
/// assert!(report.is_clean());
///
/// report.add_warning("Week 05/09/23 does not start on a Monday".to_string());
/// assert!(!report.is_clean());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// * `total_entries` - Number of sessions in the colloscope
/// * `groups` - Number of distinct groups
/// * `weeks` - Number of distinct week anchors
/// * `holidays` - Number of holiday markers
/// * `non_monday_weeks` - Week anchors falling on another day than Monday
/// * `double_bookings` - Extra sessions of a group at an already used date and time
/// * `sessions_in_holidays` - Sessions dated inside a holiday week
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_entries: usize,
    pub groups: usize,
    pub weeks: usize,
    pub holidays: usize,
    pub non_monday_weeks: usize,
    pub double_bookings: usize,
    pub sessions_in_holidays: usize,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// True when no warning was raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for parsed colloscopes.
///
/// # Examples
///
/// ```
/// use colloscope_engine::parsing::parse;
/// use colloscope_engine::preprocessing::ColloscopeValidator;
///
/// let colloscope = parse("s,p,w,h,c,04/09/23\nMaths,M. X,lundi,8h,B204,1\n").unwrap();
/// let report = ColloscopeValidator::validate(&colloscope);
/// assert!(report.is_clean());
/// assert_eq!(report.stats.total_entries, 1);
/// ```
pub struct ColloscopeValidator;

impl ColloscopeValidator {
    pub fn validate(colloscope: &Colloscope) -> ValidationReport {
        let mut report = ValidationReport::new();

        report.stats.total_entries = colloscope.len();
        report.stats.groups = colloscope.groups().len();
        report.stats.holidays = colloscope.holidays().len();

        let weeks = colloscope.weeks();
        report.stats.weeks = weeks.len();

        Self::check_week_anchors(&weeks, &mut report);
        Self::check_double_bookings(colloscope, &mut report);
        Self::check_holiday_sessions(colloscope, &mut report);

        if !report.is_clean() {
            log::warn!(
                "Colloscope validation raised {} warnings",
                report.warnings.len()
            );
        }

        report
    }

    fn check_week_anchors(weeks: &[NaiveDate], report: &mut ValidationReport) {
        for week in weeks {
            if week.weekday() != CalendarWeekday::Mon {
                report.stats.non_monday_weeks += 1;
                report.add_warning(format!(
                    "Week {} starts on a {:?}, not a Monday",
                    week.format("%d/%m/%y"),
                    week.weekday()
                ));
            }
        }
    }

    fn check_double_bookings(colloscope: &Colloscope, report: &mut ValidationReport) {
        let mut seen: HashMap<(&str, NaiveDate, NaiveTime), usize> = HashMap::new();
        for entry in colloscope.entries() {
            *seen
                .entry((entry.group.as_str(), entry.date, entry.time))
                .or_default() += 1;
        }

        let clashes: BTreeSet<_> = seen.into_iter().filter(|(_, count)| *count > 1).collect();
        for ((group, date, time), count) in clashes {
            report.stats.double_bookings += count - 1;
            report.add_warning(format!(
                "Group {} has {} sessions on {} at {}",
                group,
                count,
                date.format("%d/%m/%Y"),
                time.format("%H:%M")
            ));
        }
    }

    fn check_holiday_sessions(colloscope: &Colloscope, report: &mut ValidationReport) {
        for holiday in colloscope.holidays() {
            let end = holiday.date + Duration::days(7);
            for entry in colloscope.entries() {
                if entry.date >= holiday.date && entry.date < end {
                    report.stats.sessions_in_holidays += 1;
                    report.add_warning(format!(
                        "Group {} has a {} session on {}, during the holiday starting {}",
                        entry.group,
                        entry.subject,
                        entry.short_date(),
                        holiday.date.format("%d/%m/%Y")
                    ));
                }
            }
        }
    }
}
