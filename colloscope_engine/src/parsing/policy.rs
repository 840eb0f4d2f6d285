use serde::{Deserialize, Serialize};

/// What a fully blank row means in a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlankRowPolicy {
    /// The first blank row ends the data; later rows are discarded.
    #[default]
    EndOfData,
    /// Blank rows are ignored and scanning continues.
    Skip,
}

/// Which column a holiday sentinel takes its week anchor from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayAnchor {
    /// The column immediately before the sentinel. The marker is skipped when
    /// that column is unlabeled or is not a week date.
    #[default]
    PreviousColumn,
    /// The nearest preceding column labeled with a week date.
    LastWeekColumn,
}

/// Tunable parsing behavior for colloscope sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsePolicy {
    /// Header labels (case-insensitive) that mark a holiday column.
    pub holiday_sentinels: Vec<String>,
    /// chrono format of week anchor labels.
    pub week_date_format: String,
    pub blank_rows: BlankRowPolicy,
    pub holiday_anchor: HolidayAnchor,
}

impl Default for ParsePolicy {
    fn default() -> Self {
        Self {
            holiday_sentinels: vec!["vacances".to_string(), "vacation".to_string()],
            week_date_format: "%d/%m/%y".to_string(),
            blank_rows: BlankRowPolicy::default(),
            holiday_anchor: HolidayAnchor::default(),
        }
    }
}

impl ParsePolicy {
    pub fn is_holiday_label(&self, label: &str) -> bool {
        let label = label.trim();
        self.holiday_sentinels
            .iter()
            .any(|sentinel| sentinel.trim().eq_ignore_ascii_case(label))
    }
}
