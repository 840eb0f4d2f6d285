use crate::core::domain::ScheduleEntry;
use crate::core::error::ColloscopeResult;
use crate::export::record::{write_records, EntryRecord};

pub const HEADER: [&str; 5] = ["date", "time", "professor", "classroom", "subject"];

/// Plain table export, one entry per row, 24-hour times.
pub fn render(entries: &[ScheduleEntry]) -> ColloscopeResult<Vec<u8>> {
    write_records(
        HEADER,
        entries.iter().map(EntryRecord::from).map(|record| {
            [
                record.date.clone(),
                record.time_24h(),
                record.professor.to_string(),
                record.classroom.to_string(),
                record.subject.to_string(),
            ]
        }),
    )
}
