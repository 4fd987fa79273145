/// Utilities for date and time formatting
///
/// Timestamps from the API come as RFC 3339 (`2024-03-15T14:02:26.123Z`) or as
/// naive ISO strings without offset. Both are shown in the offset they carry.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const NO_VALUE: &str = "-";

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_timestamp(value)
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
}

/// Format ISO datetime string to DD.MM.YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    match parse_timestamp(datetime_str) {
        Some(dt) => dt.format("%d.%m.%Y %H:%M").to_string(),
        None => datetime_str.to_string(),
    }
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    match parse_date(date_str) {
        Some(d) => d.format("%d.%m.%Y").to_string(),
        None => date_str.to_string(),
    }
}

/// Дата из необязательного поля; пустое значение -> "-"
pub fn format_date_opt(value: Option<&str>) -> String {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => format_date(v),
        None => NO_VALUE.to_string(),
    }
}

pub fn format_datetime_opt(value: Option<&str>) -> String {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => format_datetime(v),
        None => NO_VALUE.to_string(),
    }
}

/// Слот забора заказа.
/// В пределах одного дня конец показывается только временем.
pub fn format_slot(start: Option<&str>, end: Option<&str>) -> String {
    let start = start.and_then(parse_timestamp);
    let end = end.and_then(parse_timestamp);
    match (start, end) {
        (Some(s), Some(e)) if s.date() == e.date() => {
            format!("{} - {}", s.format("%d.%m.%Y %H:%M"), e.format("%H:%M"))
        }
        (Some(s), Some(e)) => format!(
            "{} - {}",
            s.format("%d.%m.%Y %H:%M"),
            e.format("%d.%m.%Y %H:%M")
        ),
        (Some(s), None) => s.format("%d.%m.%Y %H:%M").to_string(),
        _ => "Not scheduled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "31.12.2024 23:59");
        assert_eq!(format_datetime("2024-12-31T23:59:59+05:30"), "31.12.2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date_opt(None), "-");
        assert_eq!(format_date_opt(Some("  ")), "-");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_slot() {
        assert_eq!(
            format_slot(Some("2024-03-15T10:00:00Z"), Some("2024-03-15T12:30:00Z")),
            "15.03.2024 10:00 - 12:30"
        );
        assert_eq!(
            format_slot(Some("2024-03-15T22:00:00Z"), Some("2024-03-16T01:00:00Z")),
            "15.03.2024 22:00 - 16.03.2024 01:00"
        );
        assert_eq!(format_slot(Some("2024-03-15T10:00:00Z"), None), "15.03.2024 10:00");
        assert_eq!(format_slot(None, Some("2024-03-15T10:00:00Z")), "Not scheduled");
    }
}
