//! Field-level record policy: candidate keys, presence, and value parsing.
//!
//! LubeLogger's record shapes drift between server versions, mostly in key
//! casing. Every field lookup therefore scans an ordered candidate list and
//! takes the first usable value. The tables below are the single place those
//! candidates live; nothing else in the workspace hardcodes a record key.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

// ============================================================================
// Candidate Key Tables
// ============================================================================

/// Keys tried, in order, when resolving a record's sort key.
pub const SORT_KEYS: &[&str] = &["Id", "id", "Date", "date"];

/// Keys tried when resolving which vehicle a record belongs to.
pub const VEHICLE_REF_KEYS: &[&str] = &["VehicleId"];

/// Keys tried when resolving a vehicle's id.
pub const VEHICLE_ID_KEYS: &[&str] = &["Id", "id"];

/// Keys tried when resolving a vehicle's display name.
pub const VEHICLE_NAME_KEYS: &[&str] = &["Name", "name"];

/// Keys tried when extracting an odometer reading.
pub const ODOMETER_VALUE_KEYS: &[&str] = &["Odometer", "odometer", "Value", "value"];

/// Keys tried when extracting a plan record's due date.
pub const PLAN_DUE_DATE_KEYS: &[&str] = &["NextDueDate", "DueDate", "Date", "date"];

/// Keys tried when extracting a tax record's amount.
pub const TAX_AMOUNT_KEYS: &[&str] = &["Amount", "amount", "Cost", "cost"];

/// Keys tried when extracting a service record's date.
pub const SERVICE_DATE_KEYS: &[&str] = &["ServiceDate", "Date", "date"];

// ============================================================================
// Presence & Parsing
// ============================================================================

/// Returns true if a value counts as present.
///
/// Null and the empty string are absent. Everything else is present,
/// including numeric zero: a zero odometer reading is real data.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Interprets a value as a number, accepting numeric strings.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Datetime formats tried after RFC 3339 parsing fails.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the date strings LubeLogger emits.
///
/// RFC 3339 timestamps keep their offset; naive timestamps and bare dates
/// are taken as UTC. Returns `None` for anything unparseable.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_is_present_rejects_null_and_empty() {
        assert!(!is_present(&Value::Null));
        assert!(!is_present(&json!("")));
        assert!(is_present(&json!("x")));
        assert!(is_present(&json!(0)));
        assert!(is_present(&json!(0.0)));
        assert!(is_present(&json!(false)));
    }

    #[test]
    fn test_as_number_accepts_numeric_strings() {
        assert_eq!(as_number(&json!(12)), Some(12.0));
        assert_eq!(as_number(&json!(12.5)), Some(12.5));
        assert_eq!(as_number(&json!("120934")), Some(120_934.0));
        assert_eq!(as_number(&json!(" 99.5 ")), Some(99.5));
        assert_eq!(as_number(&json!("12 km")), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn test_parse_date_rfc3339_utc() {
        let parsed = parse_date("2024-06-01T00:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_rfc3339_offset() {
        let parsed = parse_date("2024-06-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_naive_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 5).unwrap();
        assert_eq!(parse_date("2024-06-01T14:30:05"), Some(midnight));
        assert_eq!(parse_date("2024-06-01 14:30:05"), Some(midnight));
        let with_frac = parse_date("2024-06-01T14:30:05.250").unwrap();
        assert_eq!(with_frac.timestamp(), midnight.timestamp());
    }

    #[test]
    fn test_parse_date_bare_date_is_midnight_utc() {
        let parsed = parse_date("2024-06-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }
}
