//! Entry-to-record mapping shared by the comma-delimited renderers.

use chrono::NaiveTime;

use crate::core::domain::ScheduleEntry;
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::time::{format_12h, format_24h, format_hour_label, one_hour_later};

/// Flat view of one entry with the field formats every renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord<'a> {
    /// `DD/MM/YYYY`
    pub date: String,
    pub time: NaiveTime,
    pub subject: &'a str,
    pub professor: &'a str,
    pub classroom: &'a str,
}

impl<'a> From<&'a ScheduleEntry> for EntryRecord<'a> {
    fn from(entry: &'a ScheduleEntry) -> Self {
        Self {
            date: entry.short_date(),
            time: entry.time,
            subject: &entry.subject,
            professor: &entry.professor,
            classroom: &entry.classroom,
        }
    }
}

impl EntryRecord<'_> {
    pub fn time_24h(&self) -> String {
        format_24h(self.time)
    }

    pub fn time_12h(&self) -> String {
        format_12h(self.time)
    }

    pub fn end_time_12h(&self) -> String {
        format_12h(one_hour_later(self.time))
    }

    /// `HHhMM`, the notation used in French-language fields.
    pub fn hour_label(&self) -> String {
        format_hour_label(self.time)
    }
}

/// Serialize a header and rows as comma-delimited text.
///
/// Fields containing the delimiter, a quote or a line break are quoted.
pub fn write_records<const N: usize, I>(header: [&str; N], rows: I) -> ColloscopeResult<Vec<u8>>
where
    I: IntoIterator<Item = [String; N]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer
        .into_inner()
        .map_err(|err| ColloscopeError::Io(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Weekday;
    use chrono::NaiveDate;

    #[test]
    fn test_record_formats() {
        let entry = ScheduleEntry::new(
            "2",
            "Maths",
            "M. X",
            "B204",
            Weekday::Tuesday,
            NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        );
        let record = EntryRecord::from(&entry);
        assert_eq!(record.date, "01/10/2024");
        assert_eq!(record.time_24h(), "14:30");
        assert_eq!(record.time_12h(), "02:30 PM");
        assert_eq!(record.end_time_12h(), "03:30 PM");
        assert_eq!(record.hour_label(), "14h30");
    }

    #[test]
    fn test_write_records_quotes_delimiters() {
        let body = write_records(
            ["a", "b"],
            vec![["x, y".to_string(), "plain".to_string()]],
        )
        .unwrap();
        assert_eq!(String::from_utf8(body).unwrap(), "a,b\n\"x, y\",plain\n");
    }

    #[test]
    fn test_write_records_header_only() {
        let body = write_records(["a", "b"], Vec::<[String; 2]>::new()).unwrap();
        assert_eq!(body, b"a,b\n");
    }
}
