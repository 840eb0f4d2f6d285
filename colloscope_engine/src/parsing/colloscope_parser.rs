use std::io::Read;

use crate::core::domain::{Colloscope, ScheduleEntry};
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::parsing::header::{ColumnKind, HeaderLayout, FIXED_COLUMNS};
use crate::parsing::policy::{BlankRowPolicy, ParsePolicy};
use crate::parsing::record::{is_blank, read_rows, DecodedRow, SourceRow};

/// Parse a comma-delimited colloscope with the default policy.
///
/// # Example
///
/// ```
/// use colloscope_engine::parsing::parse;
///
/// let colloscope = parse("subject,professor,weekday,hour,classroom,04/09/23,11/09/23\n\
///                         English,Mme Jane,Wednesday,12h,E12,3,\n").unwrap();
/// assert_eq!(colloscope.len(), 1);
/// assert_eq!(colloscope.entries()[0].group, "3");
/// ```
pub fn parse(source: &str) -> ColloscopeResult<Colloscope> {
    ColloscopeParser::default().parse_str(source)
}

/// Reads colloscope tables into [`Colloscope`] aggregates.
///
/// Entries come out in source row order, and within a row in column order.
#[derive(Debug, Clone, Default)]
pub struct ColloscopeParser {
    policy: ParsePolicy,
}

impl ColloscopeParser {
    pub fn new(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ParsePolicy {
        &self.policy
    }

    pub fn parse_str(&self, source: &str) -> ColloscopeResult<Colloscope> {
        self.parse_bytes(source.as_bytes())
    }

    pub fn parse_reader<R: Read>(&self, mut source: R) -> ColloscopeResult<Colloscope> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes)
    }

    /// Parse raw bytes. Invalid UTF-8 sequences are replaced, not rejected.
    pub fn parse_bytes(&self, source: &[u8]) -> ColloscopeResult<Colloscope> {
        let rows = read_rows(source, b',')?;
        let mut rows = rows.iter();

        let header_row = rows
            .next()
            .ok_or_else(|| ColloscopeError::format("missing header row"))?;
        let header = HeaderLayout::from_labels(
            header_row.cells.iter().map(String::as_str),
            &self.policy,
        )?;
        log::debug!(
            "Header has {} columns, {} of them week columns",
            header.width(),
            header.week_count()
        );

        let mut entries = Vec::new();
        let mut data_rows = 0usize;

        for row in rows {
            if is_blank(&row.cells) {
                match self.policy.blank_rows {
                    BlankRowPolicy::EndOfData => {
                        log::debug!("Blank row at line {}, stopping", row.line);
                        break;
                    }
                    BlankRowPolicy::Skip => continue,
                }
            }

            data_rows += 1;
            self.decode_sessions(&header, row, &mut entries)?;
        }

        let holidays = header.holiday_markers(self.policy.holiday_anchor)?;

        log::info!(
            "Parsed {} sessions from {} rows ({} holidays)",
            entries.len(),
            data_rows,
            holidays.len()
        );

        Ok(Colloscope::new(entries, holidays))
    }

    fn decode_sessions(
        &self,
        header: &HeaderLayout,
        row: &SourceRow,
        entries: &mut Vec<ScheduleEntry>,
    ) -> ColloscopeResult<()> {
        let decoded = DecodedRow::decode(&row.cells, row.line)?;

        for (index, cell) in row.cells.iter().enumerate().skip(FIXED_COLUMNS) {
            if cell.is_empty() {
                continue;
            }

            match header.column(index) {
                Some(ColumnKind::Week(week)) => entries.push(ScheduleEntry::new(
                    cell.as_str(),
                    decoded.subject.as_str(),
                    decoded.professor.as_str(),
                    decoded.classroom.as_str(),
                    decoded.weekday,
                    decoded.time,
                    *week,
                )),
                Some(ColumnKind::Holiday) => {
                    log::warn!(
                        "Ignoring '{}' under a holiday column (row {}, column {})",
                        cell,
                        row.line,
                        index
                    );
                }
                Some(ColumnKind::Unlabeled) => {
                    return Err(ColloscopeError::format_at(
                        row.line,
                        format!("group '{}' in column {} which has no week label", cell, index),
                    ))
                }
                Some(ColumnKind::Unrecognized(label)) => {
                    return Err(ColloscopeError::format_at(
                        row.line,
                        format!(
                            "group '{}' in column {} whose label '{}' is neither a week date nor a holiday",
                            cell, index, label
                        ),
                    ))
                }
                None => {
                    return Err(ColloscopeError::format_at(
                        row.line,
                        format!(
                            "group '{}' in column {}, past the {} header columns",
                            cell,
                            index,
                            header.width()
                        ),
                    ))
                }
            }
        }

        Ok(())
    }
}
