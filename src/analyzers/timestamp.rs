//! Pickup timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

static DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

static OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a pickup timestamp into wall-clock time.
///
/// Timestamps carrying an offset keep the local time as written, so
/// `2024-01-01T08:00:00-05:00` is hour 8. A bare date is midnight.
pub fn parse_pickup_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Hour of day (0-23) for a pickup timestamp.
pub fn pickup_hour(value: &str) -> Option<u32> {
    parse_pickup_time(value).map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_formats() {
        assert_eq!(pickup_hour("2024-01-01 08:00:00"), Some(8));
        assert_eq!(pickup_hour("2024-01-01T23:59:59"), Some(23));
        assert_eq!(pickup_hour("2024-01-01 17:45"), Some(17));
        assert_eq!(pickup_hour("2024-01-01 06:30:00.250"), Some(6));
    }

    #[test]
    fn test_offsets_keep_wall_clock_hour() {
        assert_eq!(pickup_hour("2024-01-01T08:00:00-05:00"), Some(8));
        assert_eq!(pickup_hour("2024-01-01T21:10:00Z"), Some(21));
        assert_eq!(pickup_hour("2024-01-01 04:00:00+00:00"), Some(4));
    }

    #[test]
    fn test_us_formats() {
        assert_eq!(pickup_hour("01/15/2024 03:12:00 PM"), Some(15));
        assert_eq!(pickup_hour("01/15/2024 12:05:00 AM"), Some(0));
        assert_eq!(pickup_hour("01/15/2024 14:05"), Some(14));
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(pickup_hour("2024-03-10"), Some(0));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(pickup_hour("not a date"), None);
        assert_eq!(pickup_hour("2024-13-01 08:00:00"), None);
        assert_eq!(pickup_hour("2024-01-01 25:00:00"), None);
    }
}
