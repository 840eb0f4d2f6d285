use chrono::{Duration, NaiveDate};

use crate::core::domain::ScheduleEntry;
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::transformations::sorting::{sort_entries, SortKey};

/// Entries whose group is exactly `group`, in input order.
///
/// Returns an empty vector when nothing matches; use [`require_entries`] to
/// turn that into an error.
pub fn filter_by_group(entries: &[ScheduleEntry], group: &str) -> Vec<ScheduleEntry> {
    entries
        .iter()
        .filter(|entry| entry.group == group)
        .cloned()
        .collect()
}

/// Sessions of `group` still to come as of `as_of`, earliest first.
///
/// Sessions from the day before `as_of` are kept so a late-night query
/// still shows that day's sessions.
pub fn upcoming(entries: &[ScheduleEntry], group: &str, as_of: NaiveDate) -> Vec<ScheduleEntry> {
    let cutoff = as_of - Duration::days(1);
    let sessions: Vec<ScheduleEntry> = filter_by_group(entries, group)
        .into_iter()
        .filter(|entry| entry.date >= cutoff)
        .collect();
    sort_entries(&sessions, SortKey::ByTime)
}

/// Fail with [`ColloscopeError::EmptyResult`] when `entries` is empty.
pub fn require_entries(entries: Vec<ScheduleEntry>, group: &str) -> ColloscopeResult<Vec<ScheduleEntry>> {
    if entries.is_empty() {
        log::debug!("No session for group {}", group);
        return Err(ColloscopeError::empty_result(group));
    }
    Ok(entries)
}
