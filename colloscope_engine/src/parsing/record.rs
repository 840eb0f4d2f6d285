//! Row-level decoding: physical source rows and their fixed-width descriptive columns.

use chrono::NaiveTime;
use csv::{ByteRecord, ReaderBuilder};

use crate::core::domain::Weekday;
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::parsing::header::FIXED_COLUMNS;
use crate::time::parse_hour_field;

/// Cells of one record plus where it sits in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceRow {
    /// 1-based physical line of the first cell.
    pub line: usize,
    pub cells: Vec<String>,
    /// Line breaks embedded in quoted cells.
    pub inner_newlines: usize,
}

impl SourceRow {
    pub fn from_record(record: &ByteRecord, line: usize) -> Self {
        let inner_newlines = record
            .iter()
            .map(|field| field.iter().filter(|b| **b == b'\n').count())
            .sum();
        let cells = record
            .iter()
            .map(|field| {
                String::from_utf8_lossy(field)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();

        Self {
            line,
            cells,
            inner_newlines,
        }
    }

    /// An empty source line.
    pub fn empty(line: usize) -> Self {
        Self {
            line,
            cells: Vec::new(),
            inner_newlines: 0,
        }
    }

    /// First source line after this record.
    pub fn next_line(&self) -> usize {
        self.line + self.inner_newlines + 1
    }
}

/// Running count of `\n` bytes up to an offset that only moves forward.
struct LineCounter<'a> {
    source: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let end = offset.min(self.source.len());
        if end > self.offset {
            self.line += self.source[self.offset..end]
                .iter()
                .filter(|b| **b == b'\n')
                .count();
            self.offset = end;
        }
        self.line
    }
}

/// Read `source` into rows, one per physical line.
///
/// The csv reader drops empty lines without counting them, so line numbers
/// come from byte offsets instead, and every empty line between two records
/// comes back as a row with no cells.
pub(crate) fn read_rows(source: &[u8], delimiter: u8) -> ColloscopeResult<Vec<SourceRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut lines = LineCounter::new(source);
    let mut record = ByteRecord::new();
    let mut rows = Vec::new();
    let mut next_line = 1;

    loop {
        let start = reader.position().byte() as usize;
        if !reader.read_byte_record(&mut record)? {
            break;
        }

        // The record may start with the terminators of skipped empty lines.
        let skipped = source
            .get(start..)
            .map(|rest| {
                rest.iter()
                    .take_while(|b| matches!(**b, b'\r' | b'\n'))
                    .count()
            })
            .unwrap_or_default();
        let line = lines.line_at(start + skipped);

        rows.extend((next_line..line).map(SourceRow::empty));
        let row = SourceRow::from_record(&record, line);
        next_line = row.next_line();
        rows.push(row);
    }

    Ok(rows)
}

/// The five descriptive columns of one data row, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRow {
    pub subject: String,
    pub professor: String,
    pub weekday: Weekday,
    pub time: NaiveTime,
    pub classroom: String,
}

impl DecodedRow {
    /// Decode `cells` (already trimmed) read from source line `row`.
    ///
    /// The column count is checked before any field is touched.
    pub fn decode(cells: &[String], row: usize) -> ColloscopeResult<Self> {
        let [subject, professor, weekday, hour, classroom] = match cells.get(..FIXED_COLUMNS) {
            Some([a, b, c, d, e]) => [a, b, c, d, e],
            _ => {
                return Err(ColloscopeError::format_at(
                    row,
                    format!(
                        "expected at least {} descriptive columns, found {}",
                        FIXED_COLUMNS,
                        cells.len()
                    ),
                ))
            }
        };

        let weekday = Weekday::from_label(weekday).ok_or_else(|| {
            ColloscopeError::format_at(
                row,
                format!("'{}' is not a session weekday (Monday to Saturday)", weekday),
            )
        })?;

        let time = parse_hour_field(hour).map_err(|reason| {
            ColloscopeError::format_at(row, format!("bad hour field '{}': {}", hour, reason))
        })?;

        Ok(Self {
            subject: subject.clone(),
            professor: professor.clone(),
            weekday,
            time,
            classroom: classroom.clone(),
        })
    }
}

/// A row with no content in any cell.
pub fn is_blank(cells: &[String]) -> bool {
    cells.iter().all(|cell| cell.is_empty())
}
