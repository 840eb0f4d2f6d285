use chrono::{Duration, NaiveTime, Timelike};

/// Parse a colloscope hour cell into a time of day.
///
/// Expected format: `HHhMM` or `HHh` (minute defaults to 0).
/// The separator is matched case-insensitively and surrounding spaces are ignored.
///
/// # Example
/// ```
/// use colloscope_engine::time::parse_hour_field;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_hour_field("12h").unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
/// assert_eq!(parse_hour_field("8h30").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
/// ```
pub fn parse_hour_field(raw: &str) -> Result<NaiveTime, String> {
    let cleaned = raw.trim();

    let (raw_hour, raw_minute) = cleaned
        .split_once(['h', 'H'])
        .ok_or_else(|| format!("hour field '{}' has no 'h' separator", raw))?;

    let hour: u32 = raw_hour
        .trim()
        .parse()
        .map_err(|_| format!("hour field '{}' has an invalid hour component", raw))?;

    let minute: u32 = match raw_minute.trim() {
        "" => 0,
        minute => minute
            .parse()
            .map_err(|_| format!("hour field '{}' has an invalid minute component", raw))?,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("hour field '{}' is not a valid time of day", raw))
}

/// 24-hour clock, `HH:MM`.
pub fn format_24h(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// 12-hour clock as calendar importers expect it, `hh:mm AM`.
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Same notation as the source table, `HHhMM`.
pub fn format_hour_label(time: NaiveTime) -> String {
    format!("{:02}h{:02}", time.hour(), time.minute())
}

/// End of a session that starts at `time`.
///
/// Sessions never start at 23:00 or later, so no midnight rollover is handled.
pub fn one_hour_later(time: NaiveTime) -> NaiveTime {
    time + Duration::hours(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_hour_without_minutes() {
        assert_eq!(parse_hour_field("12h").unwrap(), hm(12, 0));
        assert_eq!(parse_hour_field(" 9h ").unwrap(), hm(9, 0));
    }

    #[test]
    fn test_parse_hour_with_minutes() {
        assert_eq!(parse_hour_field("14h30").unwrap(), hm(14, 30));
        assert_eq!(parse_hour_field("08H05").unwrap(), hm(8, 5));
    }

    #[test]
    fn test_parse_hour_rejects_missing_separator() {
        let err = parse_hour_field("12").unwrap_err();
        assert!(err.contains("separator"), "unexpected message: {}", err);
        assert!(parse_hour_field("12:30").is_err());
    }

    #[test]
    fn test_parse_hour_rejects_garbage() {
        assert!(parse_hour_field("").is_err());
        assert!(parse_hour_field("xh30").is_err());
        assert!(parse_hour_field("12hxx").is_err());
        assert!(parse_hour_field("25h").is_err());
        assert!(parse_hour_field("10h75").is_err());
    }

    #[test]
    fn test_formats() {
        let t = hm(14, 0);
        assert_eq!(format_24h(t), "14:00");
        assert_eq!(format_12h(t), "02:00 PM");
        assert_eq!(format_hour_label(t), "14h00");
        assert_eq!(format_12h(hm(9, 15)), "09:15 AM");
        assert_eq!(format_hour_label(hm(9, 5)), "09h05");
    }

    #[test]
    fn test_one_hour_later() {
        assert_eq!(one_hour_later(hm(12, 30)), hm(13, 30));
        assert_eq!(one_hour_later(hm(17, 0)), hm(18, 0));
    }
}
