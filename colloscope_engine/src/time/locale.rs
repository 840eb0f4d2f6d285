//! Human-readable dates in the colloscope's source language.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::Weekday;

const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Language used for long-form dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// Lowercase month name, `month` in 1..=12.
    pub fn month_name(self, month: u32) -> &'static str {
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::French => FRENCH_MONTHS[index],
            Locale::English => ENGLISH_MONTHS[index],
        }
    }

    /// Lowercase weekday name.
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        match self {
            Locale::French => weekday.french_name(),
            Locale::English => weekday.english_name(),
        }
    }

    /// Long-form date such as `mercredi 6 septembre`.
    pub fn long_date(self, weekday: Weekday, date: NaiveDate) -> String {
        format!(
            "{} {} {}",
            self.weekday_name(weekday),
            date.day(),
            self.month_name(date.month())
        )
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::French => write!(f, "fr"),
            Locale::English => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "french" | "francais" | "français" => Ok(Locale::French),
            "en" | "english" => Ok(Locale::English),
            other => Err(format!("Unsupported locale '{}'. Use 'fr' or 'en'.", other)),
        }
    }
}

/// Capitalise the first letter of every word and lowercase the rest.
///
/// Word boundaries are any non-alphabetic character, so `"lundi 2 octobre"`
/// becomes `"Lundi 2 Octobre"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date_french() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 6).unwrap();
        assert_eq!(
            Locale::French.long_date(Weekday::Wednesday, date),
            "mercredi 6 septembre"
        );
    }

    #[test]
    fn test_long_date_english() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 12).unwrap();
        assert_eq!(
            Locale::English.long_date(Weekday::Monday, date),
            "monday 12 august"
        );
    }

    #[test]
    fn test_month_names_with_accents() {
        assert_eq!(Locale::French.month_name(2), "février");
        assert_eq!(Locale::French.month_name(8), "août");
        assert_eq!(Locale::French.month_name(12), "décembre");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("lundi 2 octobre"), "Lundi 2 Octobre");
        assert_eq!(title_case("samedi 14 août"), "Samedi 14 Août");
        assert_eq!(title_case("MARDI 1 mai"), "Mardi 1 Mai");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("fr".parse::<Locale>().unwrap(), Locale::French);
        assert_eq!("English".parse::<Locale>().unwrap(), Locale::English);
        assert!("de".parse::<Locale>().is_err());
    }
}
