use crate::core::domain::ScheduleEntry;
use crate::core::error::ColloscopeResult;
use crate::export::record::{write_records, EntryRecord};
use crate::export::ExportOptions;

/// Task-manager import columns, uppercase as the importer expects them.
pub const HEADER: [&str; 10] = [
    "TYPE",
    "CONTENT",
    "DESCRIPTION",
    "PRIORITY",
    "INDENT",
    "AUTHOR",
    "RESPONSIBLE",
    "DATE",
    "DATE_LANG",
    "TIMEZONE",
];

const TASK_TYPE: &str = "task";

/// One task per session, dated `DD/MM/YYYY HHhMM`.
pub fn render(entries: &[ScheduleEntry], options: &ExportOptions) -> ColloscopeResult<Vec<u8>> {
    write_records(
        HEADER,
        entries.iter().map(EntryRecord::from).map(|record| {
            [
                TASK_TYPE.to_string(),
                format!("Colle de {} avec {}", record.subject, record.professor),
                format!("Salle {}", record.classroom),
                options.task_priority.to_string(),
                String::new(),
                String::new(),
                String::new(),
                format!("{} {}", record.date, record.hour_label()),
                options.date_lang.clone(),
                options.timezone.clone(),
            ]
        }),
    )
}
