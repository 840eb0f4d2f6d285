use crate::core::domain::ScheduleEntry;
use crate::core::error::ColloscopeResult;
use crate::export::record::{write_records, EntryRecord};

/// Column set understood by common calendar importers.
pub const HEADER: [&str; 8] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "All Day Event",
    "Description",
    "Location",
];

/// Calendar import export. Every session lasts one hour.
pub fn render(entries: &[ScheduleEntry]) -> ColloscopeResult<Vec<u8>> {
    write_records(
        HEADER,
        entries.iter().map(EntryRecord::from).map(|record| {
            [
                format!("{} {} {}", record.subject, record.professor, record.classroom),
                record.date.clone(),
                record.time_12h(),
                record.date.clone(),
                record.end_time_12h(),
                "False".to_string(),
                format!(
                    "Colle de {} avec {} en {} a {}",
                    record.subject,
                    record.professor,
                    record.classroom,
                    record.hour_label()
                ),
                record.classroom.to_string(),
            ]
        }),
    )
}
