//! Rendering of schedule entries into downloadable exports.
//!
//! Every renderer walks the entries in the order it receives them; sorting is
//! the caller's job. The three comma-delimited formats share the mapping in
//! [`record`], and the printable document is laid out in [`document`].
//!
//! # Example
//!
//! ```
//! use colloscope_engine::export::{render, ExportFormat, ExportOptions};
//!
//! let export = render(&[], ExportFormat::Table, "3", &[], &ExportOptions::default()).unwrap();
//! assert_eq!(export.as_text(), Some("date,time,professor,classroom,subject\n"));
//! assert_eq!(export.file_name(), "colloscope.csv");
//! ```

pub mod calendar;
pub mod document;
pub mod record;
pub mod table;
pub mod tasklist;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::{HolidayMarker, ScheduleEntry};
use crate::core::error::ColloscopeResult;
use crate::time::Locale;

pub use document::{Block, DocumentLayout, DocumentRow};
pub use record::EntryRecord;

/// Target format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Paginated printable PDF.
    Document,
    /// Plain comma-delimited table.
    Table,
    /// Calendar import records.
    Calendar,
    /// Task-manager import records.
    Tasklist,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Document,
        ExportFormat::Table,
        ExportFormat::Calendar,
        ExportFormat::Tasklist,
    ];

    /// True for the comma-delimited formats.
    pub fn is_text(self) -> bool {
        !matches!(self, ExportFormat::Document)
    }

    /// Name of the file handed to the user.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Document => "colloscope.pdf",
            _ => "colloscope.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Document => "document",
            ExportFormat::Table => "table",
            ExportFormat::Calendar => "calendar",
            ExportFormat::Tasklist => "tasklist",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "document" | "pdf" => Ok(ExportFormat::Document),
            "table" | "csv" => Ok(ExportFormat::Table),
            "calendar" | "agenda" => Ok(ExportFormat::Calendar),
            "tasklist" | "todoist" => Ok(ExportFormat::Tasklist),
            other => Err(format!(
                "Invalid export format: {}. Must be 'document', 'table', 'calendar' or 'tasklist'",
                other
            )),
        }
    }
}

/// Settings that vary between deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Language of long-form dates in the document.
    pub locale: Locale,
    /// Language tag written in the tasklist `DATE_LANG` column.
    pub date_lang: String,
    pub timezone: String,
    pub task_priority: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            locale: Locale::French,
            date_lang: "fr".to_string(),
            timezone: "Europe/Paris".to_string(),
            task_priority: 2,
        }
    }
}

/// Bytes of one export plus the format that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExport {
    pub format: ExportFormat,
    pub body: Vec<u8>,
}

impl RenderedExport {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    /// Body as text, `None` for the document format.
    pub fn as_text(&self) -> Option<&str> {
        if self.format.is_text() {
            std::str::from_utf8(&self.body).ok()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Render `entries` in `format`.
///
/// `group_label` and `holidays` only affect the document format. An empty
/// `entries` slice yields a header-only export.
pub fn render(
    entries: &[ScheduleEntry],
    format: ExportFormat,
    group_label: &str,
    holidays: &[HolidayMarker],
    options: &ExportOptions,
) -> ColloscopeResult<RenderedExport> {
    let body = match format {
        ExportFormat::Document => document::render(entries, group_label, holidays, options.locale)?,
        ExportFormat::Table => table::render(entries)?,
        ExportFormat::Calendar => calendar::render(entries)?,
        ExportFormat::Tasklist => tasklist::render(entries, options)?,
    };

    log::debug!(
        "Rendered {} entries as {} ({} bytes)",
        entries.len(),
        format,
        body.len()
    );

    Ok(RenderedExport { format, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Weekday;
    use chrono::{NaiveDate, NaiveTime};

    fn sample() -> Vec<ScheduleEntry> {
        vec![ScheduleEntry::new(
            "2",
            "Maths",
            "M. X",
            "B204",
            Weekday::Tuesday,
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        )]
    }

    #[test]
    fn test_format_parsing_accepts_aliases() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Document);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Table);
        assert_eq!("agenda".parse::<ExportFormat>().unwrap(), ExportFormat::Calendar);
        assert_eq!("todoist".parse::<ExportFormat>().unwrap(), ExportFormat::Tasklist);
        assert!("xlsx".parse::<ExportFormat>().is_err());

        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportFormat::Document.file_name(), "colloscope.pdf");
        assert_eq!(ExportFormat::Calendar.file_name(), "colloscope.csv");
    }

    /// Every format survives an empty entry list
    #[test]
    fn test_render_empty_entries() {
        let options = ExportOptions::default();
        for format in ExportFormat::ALL {
            let export = render(&[], format, "1", &[], &options).unwrap();
            assert!(!export.is_empty());
            if format.is_text() {
                assert_eq!(export.as_text().unwrap().lines().count(), 1);
            }
        }
    }

    #[test]
    fn test_render_dispatches_by_format() {
        let options = ExportOptions::default();
        let table = render(&sample(), ExportFormat::Table, "2", &[], &options).unwrap();
        assert!(table.as_text().unwrap().starts_with("date,time,"));

        let tasks = render(&sample(), ExportFormat::Tasklist, "2", &[], &options).unwrap();
        assert!(tasks.as_text().unwrap().contains("01/10/2024 14h00"));

        let pdf = render(&sample(), ExportFormat::Document, "2", &[], &options).unwrap();
        assert!(pdf.as_text().is_none());
        assert!(pdf.body.starts_with(b"%PDF"));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ExportOptions = toml::from_str("locale = \"en\"\ntask_priority = 4").unwrap();
        assert_eq!(options.locale, Locale::English);
        assert_eq!(options.task_priority, 4);
        assert_eq!(options.timezone, "Europe/Paris");
    }
}
