//! Header row classification.
//!
//! Columns 0-4 of a colloscope header are descriptive (subject, professor,
//! weekday, hour, classroom). Every later column is labeled with either a week
//! anchor date or a holiday sentinel.

use chrono::{Duration, NaiveDate};

use crate::core::domain::HolidayMarker;
use crate::core::error::{ColloscopeError, ColloscopeResult};
use crate::parsing::policy::{HolidayAnchor, ParsePolicy};

/// Number of descriptive columns before the week columns.
pub const FIXED_COLUMNS: usize = 5;

/// Source line of the header row.
const HEADER_ROW: usize = 1;

/// Meaning of one header label past the descriptive columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    Week(NaiveDate),
    Holiday,
    Unlabeled,
    Unrecognized(String),
}

impl ColumnKind {
    fn classify(label: &str, policy: &ParsePolicy) -> Self {
        let label = label.trim();
        if label.is_empty() {
            ColumnKind::Unlabeled
        } else if policy.is_holiday_label(label) {
            ColumnKind::Holiday
        } else {
            match NaiveDate::parse_from_str(label, &policy.week_date_format) {
                Ok(date) => ColumnKind::Week(date),
                Err(_) => ColumnKind::Unrecognized(label.to_string()),
            }
        }
    }

    pub fn week(&self) -> Option<NaiveDate> {
        match self {
            ColumnKind::Week(date) => Some(*date),
            _ => None,
        }
    }
}

/// Classified header of a colloscope table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Kinds of the columns from `FIXED_COLUMNS` onwards.
    columns: Vec<ColumnKind>,
}

impl HeaderLayout {
    pub fn from_labels<'a, I>(labels: I, policy: &ParsePolicy) -> ColloscopeResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = labels.into_iter().collect();
        if labels.len() < FIXED_COLUMNS {
            return Err(ColloscopeError::format_at(
                HEADER_ROW,
                format!(
                    "header has {} columns, expected at least {} descriptive columns",
                    labels.len(),
                    FIXED_COLUMNS
                ),
            ));
        }

        let columns = labels[FIXED_COLUMNS..]
            .iter()
            .map(|label| ColumnKind::classify(label, policy))
            .collect();

        Ok(Self { columns })
    }

    /// Kind of the column at absolute index `index`, `None` for descriptive
    /// columns and for columns past the end of the header.
    pub fn column(&self, index: usize) -> Option<&ColumnKind> {
        index
            .checked_sub(FIXED_COLUMNS)
            .and_then(|offset| self.columns.get(offset))
    }

    /// Total number of columns, descriptive ones included.
    pub fn width(&self) -> usize {
        FIXED_COLUMNS + self.columns.len()
    }

    pub fn week_count(&self) -> usize {
        self.columns.iter().filter(|c| c.week().is_some()).count()
    }

    /// Holiday markers in column order, each one week after its anchor.
    ///
    /// Consecutive sentinels sharing an anchor are one break and give one
    /// marker. Fails when the resulting dates are not strictly increasing.
    pub fn holiday_markers(&self, anchor: HolidayAnchor) -> ColloscopeResult<Vec<HolidayMarker>> {
        let mut markers: Vec<HolidayMarker> = Vec::new();
        let mut last_anchor: Option<NaiveDate> = None;

        for (offset, kind) in self.columns.iter().enumerate() {
            if *kind != ColumnKind::Holiday {
                continue;
            }

            let anchor_date = match anchor {
                HolidayAnchor::PreviousColumn => offset
                    .checked_sub(1)
                    .and_then(|prev| self.columns[prev].week()),
                HolidayAnchor::LastWeekColumn => {
                    self.columns[..offset].iter().rev().find_map(ColumnKind::week)
                }
            };

            let Some(anchor_date) = anchor_date else {
                log::debug!(
                    "Holiday column {} has no week anchor before it, skipping",
                    offset + FIXED_COLUMNS
                );
                continue;
            };
            if last_anchor == Some(anchor_date) {
                log::debug!(
                    "Holiday column {} continues the break after {}",
                    offset + FIXED_COLUMNS,
                    anchor_date
                );
                continue;
            }
            last_anchor = Some(anchor_date);

            let marker = HolidayMarker::new(anchor_date + Duration::days(7));
            if let Some(last) = markers.last() {
                if marker.date <= last.date {
                    return Err(ColloscopeError::format_at(
                        HEADER_ROW,
                        format!(
                            "holiday starting {} (column {}) does not come after the holiday starting {}",
                            marker.date,
                            offset + FIXED_COLUMNS,
                            last.date
                        ),
                    ));
                }
            }
            markers.push(marker);
        }

        Ok(markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(labels: &[&str]) -> HeaderLayout {
        HeaderLayout::from_labels(labels.iter().copied(), &ParsePolicy::default()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const FIXED: [&str; 5] = ["Matiere", "Prof", "Jour", "Heure", "Salle"];

    #[test]
    fn test_classifies_week_and_holiday_columns() {
        let mut labels = FIXED.to_vec();
        labels.extend(["04/09/23", "Vacances", "", "semaine 3"]);
        let header = layout(&labels);

        assert_eq!(header.column(0), None);
        assert_eq!(header.column(5), Some(&ColumnKind::Week(date(2023, 9, 4))));
        assert_eq!(header.column(6), Some(&ColumnKind::Holiday));
        assert_eq!(header.column(7), Some(&ColumnKind::Unlabeled));
        assert_eq!(
            header.column(8),
            Some(&ColumnKind::Unrecognized("semaine 3".to_string()))
        );
        assert_eq!(header.column(9), None);
        assert_eq!(header.width(), 9);
        assert_eq!(header.week_count(), 1);
    }

    #[test]
    fn test_rejects_short_header() {
        let err = HeaderLayout::from_labels(["a", "b", "c"], &ParsePolicy::default()).unwrap_err();
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn test_holiday_is_one_week_after_previous_column() {
        let mut labels = FIXED.to_vec();
        labels.extend(["28/08/23", "04/09/23", "Vacances", "18/09/23"]);
        let markers = layout(&labels)
            .holiday_markers(HolidayAnchor::PreviousColumn)
            .unwrap();
        assert_eq!(markers, vec![HolidayMarker::new(date(2023, 9, 11))]);
    }

    #[test]
    fn test_leading_holiday_without_anchor_is_skipped() {
        let mut labels = FIXED.to_vec();
        labels.extend(["Vacances", "04/09/23"]);
        let markers = layout(&labels)
            .holiday_markers(HolidayAnchor::PreviousColumn)
            .unwrap();
        assert!(markers.is_empty());
    }

    #[test]
    fn test_unlabeled_previous_column_is_skipped_or_searched() {
        let mut labels = FIXED.to_vec();
        labels.extend(["04/09/23", "", "Vacances", "25/09/23"]);
        let header = layout(&labels);

        assert!(header
            .holiday_markers(HolidayAnchor::PreviousColumn)
            .unwrap()
            .is_empty());
        assert_eq!(
            header
                .holiday_markers(HolidayAnchor::LastWeekColumn)
                .unwrap(),
            vec![HolidayMarker::new(date(2023, 9, 11))]
        );
    }

    #[test]
    fn test_holidays_must_increase() {
        let mut labels = FIXED.to_vec();
        labels.extend(["16/10/23", "Vacances", "02/10/23", "Vacances"]);
        let err = layout(&labels)
            .holiday_markers(HolidayAnchor::PreviousColumn)
            .unwrap_err();
        assert!(err.to_string().contains("does not come after"));
    }

    /// A two-week break written as two sentinel columns gives a single marker
    #[test]
    fn test_consecutive_sentinels_are_one_break() {
        let mut labels = FIXED.to_vec();
        labels.extend(["16/10/23", "Vacances", "Vacances", "06/11/23", "Vacances", "20/11/23"]);
        let header = layout(&labels);

        let expected = vec![
            HolidayMarker::new(date(2023, 10, 23)),
            HolidayMarker::new(date(2023, 11, 13)),
        ];
        assert_eq!(
            header.holiday_markers(HolidayAnchor::LastWeekColumn).unwrap(),
            expected
        );
        assert_eq!(
            header.holiday_markers(HolidayAnchor::PreviousColumn).unwrap(),
            expected
        );
    }
}
