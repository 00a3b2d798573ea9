use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Formats a bottom-axis date label.
pub type DateLabelFormatter = Arc<dyn Fn(DateTime<Utc>) -> String + Send + Sync>;
/// Formats a left-axis value label.
pub type ValueLabelFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Formats with a `chrono` strftime pattern; the default pattern `%b %-d`
/// renders "Mar 7".
#[must_use]
pub fn format_date_label(date: DateTime<Utc>, pattern: &str) -> String {
    date.format(pattern).to_string()
}

/// Compact number label: `950`, `1.2K`, `3M`, `4.5B`.
#[must_use]
pub fn format_compact_number(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    let precision = if suffix.is_empty() && abs < 1.0 { 2 } else { 1 };
    let text = format!("{scaled:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    };
    let text = if text == "-0" { "0".to_owned() } else { text };
    format!("{text}{suffix}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn compact_numbers_trim_trailing_zeros() {
        assert_eq!(format_compact_number(0.0), "0");
        assert_eq!(format_compact_number(950.0), "950");
        assert_eq!(format_compact_number(1_200.0), "1.2K");
        assert_eq!(format_compact_number(3_000_000.0), "3M");
        assert_eq!(format_compact_number(-4_500_000_000.0), "-4.5B");
        assert_eq!(format_compact_number(0.25), "0.25");
        assert_eq!(format_compact_number(12.5), "12.5");
    }

    #[test]
    fn default_date_pattern_is_month_and_day() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).single().expect("date");
        assert_eq!(format_date_label(date, "%b %-d"), "Mar 7");
    }
}
