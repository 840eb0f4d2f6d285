//! Conversion of spreadsheet exports into the native colloscope layout.
//!
//! Some classes receive their colloscope as a `;`-delimited spreadsheet export:
//! a three-line preamble, the header, two filler lines, then the data rows with
//! the classroom before the weekday and hour ranges such as `12h - 13h`.

use chrono::NaiveDate;

use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::parsing::header::FIXED_COLUMNS;
use crate::parsing::record::{is_blank, read_rows, SourceRow};

const PREAMBLE_LINES: usize = 3;
const FILLER_LINES: usize = 2;

const SPREADSHEET_DATE_FORMAT: &str = "%d-%m-%Y";
const NATIVE_DATE_FORMAT: &str = "%d/%m/%y";

/// Rewrites spreadsheet exports as native comma-delimited sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetNormalizer;

impl SpreadsheetNormalizer {
    /// Convert a spreadsheet export to native text.
    ///
    /// The preamble and filler counts are physical lines, empty ones included.
    /// Rows stop at the first blank row. A data row with fewer than five
    /// columns cannot be reordered and is a format error.
    ///
    /// # Example
    ///
    /// ```
    /// use colloscope_engine::preprocessing::SpreadsheetNormalizer;
    ///
    /// let export = "Colloscope MPI;;;;;\n;;;;;\n;;;;;\n\
    ///               Matiere;Prof;Salle;Jour;Heure;04-09-2023\n;;;;;\n;;;;;\n\
    ///               Maths;M. X;B204;lundi;8h - 9h;1\n";
    /// let native = SpreadsheetNormalizer.normalize(export.as_bytes()).unwrap();
    /// assert_eq!(native, ",,,,,04/09/23\nMaths,M. X,lundi,8h,B204,1\n");
    /// ```
    pub fn normalize(&self, source: &[u8]) -> ColloscopeResult<String> {
        let mut rows = read_rows(source, b';')?.into_iter().skip(PREAMBLE_LINES);
        let header = rows
            .next()
            .filter(|row| !is_blank(&row.cells))
            .ok_or_else(|| {
                ColloscopeError::format_at(
                    PREAMBLE_LINES + 1,
                    "spreadsheet export has no header row",
                )
            })?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(Self::native_header(&header.cells))?;

        let mut written = 0usize;
        for row in rows.skip(FILLER_LINES) {
            if is_blank(&row.cells) {
                break;
            }
            writer.write_record(Self::native_row(&row)?)?;
            written += 1;
        }

        let body = writer
            .into_inner()
            .map_err(|err| ColloscopeError::Io(err.into_error()))?;
        log::info!("Normalized {} spreadsheet rows", written);

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Blank descriptive labels, then week labels as `DD/MM/YY`.
    fn native_header(labels: &[String]) -> Vec<String> {
        let weeks = labels.iter().skip(FIXED_COLUMNS).map(|label| {
            match NaiveDate::parse_from_str(label, SPREADSHEET_DATE_FORMAT) {
                Ok(date) => date.format(NATIVE_DATE_FORMAT).to_string(),
                Err(_) => label.clone(),
            }
        });

        std::iter::repeat(String::new())
            .take(FIXED_COLUMNS)
            .chain(weeks)
            .collect()
    }

    /// `subject, professor, classroom, weekday, hours` becomes
    /// `subject, professor, weekday, hour, classroom`.
    fn native_row(row: &SourceRow) -> ColloscopeResult<Vec<String>> {
        let cells = &row.cells;
        if cells.len() < FIXED_COLUMNS {
            return Err(ColloscopeError::format_at(
                row.line,
                format!(
                    "spreadsheet row has {} columns, expected at least {}",
                    cells.len(),
                    FIXED_COLUMNS
                ),
            ));
        }

        let start_hour = cells[4]
            .split('-')
            .next()
            .unwrap_or_default()
            .replace(' ', "");

        let mut native = Vec::with_capacity(cells.len());
        native.push(cells[0].clone());
        native.push(cells[1].clone());
        native.push(cells[3].clone());
        native.push(start_hour);
        native.push(cells[2].clone());
        native.extend(cells[FIXED_COLUMNS..].iter().cloned());
        Ok(native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse;
    use chrono::NaiveTime;

    const EXPORT: &str = "\
Colloscope MPI 2023;;;;;;;
Semestre 1;;;;;;;
;;;;;;;
Matiere;Prof;Salle;Jour;Heure;04-09-2023;11-09-2023;Vacances
;S1;S2;;;;;
;;;;;;;
Maths;M. X;B204;lundi;8h - 9h;1;2;
Anglais;Mme Jane;E12;mercredi;12h30 - 13h30;3;;
;;;;;;;
Notes;;;;;;;
";

    #[test]
    fn test_normalize_reorders_and_converts() {
        let native = SpreadsheetNormalizer.normalize(EXPORT.as_bytes()).unwrap();
        let lines: Vec<&str> = native.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ",,,,,04/09/23,11/09/23,Vacances");
        assert_eq!(lines[1], "Maths,M. X,lundi,8h,B204,1,2,");
        assert_eq!(lines[2], "Anglais,Mme Jane,mercredi,12h30,E12,3,,");
    }

    /// Normalized output is a valid native source
    #[test]
    fn test_normalized_output_parses() {
        let native = SpreadsheetNormalizer.normalize(EXPORT.as_bytes()).unwrap();
        let colloscope = parse(&native).unwrap();

        assert_eq!(colloscope.len(), 3);
        assert_eq!(colloscope.holidays().len(), 1);
        let english = &colloscope.entries()[2];
        assert_eq!(english.classroom, "E12");
        assert_eq!(english.time, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
    }

    #[test]
    fn test_short_row_is_format_error() {
        let export = "a\nb\nc\nMatiere;Prof;Salle;Jour;Heure;04-09-2023\nx\ny\nMaths;M. X;B204\n";
        let err = SpreadsheetNormalizer.normalize(export.as_bytes()).unwrap_err();
        assert_eq!(err.row(), Some(7));
    }

    /// Empty preamble and filler lines count like any other line
    #[test]
    fn test_empty_preamble_and_filler_lines() {
        let expected = ",,,,,04/09/23\nMaths,M. X,lundi,8h,B204,1\n";

        let export = "Colloscope MPI\n\n\nMatiere;Prof;Salle;Jour;Heure;04-09-2023\n;;;;;\n;;;;;\n\
                      Maths;M. X;B204;lundi;8h - 9h;1\n";
        assert_eq!(SpreadsheetNormalizer.normalize(export.as_bytes()).unwrap(), expected);

        let export = "Colloscope MPI\n\n\nMatiere;Prof;Salle;Jour;Heure;04-09-2023\n\n\n\
                      Maths;M. X;B204;lundi;8h - 9h;1\n\nNotes;;;;;\n";
        assert_eq!(SpreadsheetNormalizer.normalize(export.as_bytes()).unwrap(), expected);
    }

    #[test]
    fn test_missing_header_is_format_error() {
        let err = SpreadsheetNormalizer.normalize(b"a\nb\n").unwrap_err();
        assert!(err.to_string().contains("no header row"));
    }
}
