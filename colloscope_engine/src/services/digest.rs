//! "Next sessions" message for a group.

use chrono::NaiveDate;

use crate::core::domain::ScheduleEntry;
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::time::{title_case, Locale};
use crate::transformations::upcoming;

/// Sessions listed when the caller does not say how many.
pub const DEFAULT_UPCOMING_COUNT: usize = 5;

/// Markdown list of the next sessions of `group` as of `as_of`.
///
/// Lists `min(requested, available, limit)` sessions, earliest first.
///
/// # Example
///
/// ```
/// use colloscope_engine::parsing::parse;
/// use colloscope_engine::services::digest::upcoming_digest;
/// use colloscope_engine::time::Locale;
/// use chrono::NaiveDate;
///
/// let colloscope = parse("s,p,w,h,c,02/10/23\nAnglais,Mme Jane,lundi,12h,E12,3\n").unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
/// let digest = upcoming_digest(colloscope.entries(), "3", as_of, 5, Locale::French, 12).unwrap();
/// assert_eq!(
///     digest,
///     "### __Liste des 1 prochaines Colles du groupe 3 :__\n\
///      **Lundi 2 Octobre : 12h00** - __Anglais__ - en E12 avec Mme Jane\n"
/// );
/// ```
pub fn upcoming_digest(
    entries: &[ScheduleEntry],
    group: &str,
    as_of: NaiveDate,
    requested: usize,
    locale: Locale,
    limit: usize,
) -> ColloscopeResult<String> {
    let sessions = upcoming(entries, group, as_of);
    let count = requested.min(sessions.len()).min(limit);
    if count == 0 {
        return Err(ColloscopeError::empty_result(group));
    }

    let mut text = format!(
        "### __Liste des {} prochaines Colles du groupe {} :__\n",
        count, group
    );
    for entry in sessions.iter().take(count) {
        text.push_str(&format!(
            "**{} : {}** - __{}__ - en {} avec {}\n",
            title_case(&entry.long_date(locale)),
            entry.hour_label(),
            entry.subject,
            entry.classroom,
            entry.professor
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Weekday;
    use chrono::{Duration, NaiveTime};

    fn sessions(group: &str, weeks: i64) -> Vec<ScheduleEntry> {
        (0..weeks)
            .map(|w| {
                ScheduleEntry::new(
                    group,
                    "Maths",
                    "M. X",
                    "B204",
                    Weekday::Thursday,
                    NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                    NaiveDate::from_ymd_opt(2024, 9, 2).unwrap() + Duration::weeks(w),
                )
            })
            .collect()
    }

    #[test]
    fn test_count_is_capped_by_limit() {
        let entries = sessions("2", 20);
        let as_of = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let digest = upcoming_digest(&entries, "2", as_of, 30, Locale::French, 12).unwrap();

        assert!(digest.starts_with("### __Liste des 12 prochaines Colles du groupe 2 :__\n"));
        assert_eq!(digest.lines().count(), 13);
        assert!(digest.contains("**Jeudi 5 Septembre : 17h00** - __Maths__ - en B204 avec M. X"));
    }

    #[test]
    fn test_default_count_lists_five() {
        let entries = sessions("2", 20);
        let as_of = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let digest =
            upcoming_digest(&entries, "2", as_of, DEFAULT_UPCOMING_COUNT, Locale::French, 12).unwrap();
        assert!(digest.starts_with("### __Liste des 5 prochaines Colles du groupe 2 :__\n"));
        assert_eq!(digest.lines().count(), 6);
    }

    #[test]
    fn test_count_is_capped_by_available() {
        let entries = sessions("2", 3);
        let as_of = NaiveDate::from_ymd_opt(2024, 9, 14).unwrap();
        let digest = upcoming_digest(&entries, "2", as_of, 5, Locale::French, 12).unwrap();
        assert!(digest.starts_with("### __Liste des 1 prochaines"));
    }

    #[test]
    fn test_nothing_upcoming_is_empty_result() {
        let entries = sessions("2", 3);
        let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = upcoming_digest(&entries, "2", as_of, 5, Locale::French, 12).unwrap_err();
        assert!(err.is_empty_result());

        let err = upcoming_digest(&entries, "9", as_of, 5, Locale::French, 12).unwrap_err();
        assert!(err.is_empty_result());
    }
}
