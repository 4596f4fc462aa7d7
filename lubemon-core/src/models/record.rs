//! Loosely typed API records and the latest-record selection policy.
//!
//! LubeLogger returns arrays of JSON objects whose shape varies between
//! server versions. [`Record`] keeps the raw object intact and layers
//! candidate-key lookups on top, so consumers can read the typed fields they
//! understand while still passing the full object through untouched.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fields::{self, SORT_KEYS, VEHICLE_REF_KEYS};

// ============================================================================
// Record
// ============================================================================

/// A single record as returned by the LubeLogger API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    /// Wraps a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value of the first candidate key that is present.
    ///
    /// Presence follows [`fields::is_present`]: null and the empty string
    /// are skipped, numeric zero is not.
    pub fn first_present(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .find_map(|key| self.0.get(*key).filter(|v| fields::is_present(v)))
    }

    /// Returns the first candidate whose value reads as a number.
    ///
    /// Candidates holding something non-numeric are skipped, not treated as
    /// terminal; a later candidate can still supply the value.
    pub fn number_field(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|key| self.0.get(*key).and_then(fields::as_number))
    }

    /// Returns the first candidate whose value parses as a date.
    pub fn date_field(&self, keys: &[&str]) -> Option<DateTime<Utc>> {
        keys.iter().find_map(|key| {
            self.0
                .get(*key)
                .and_then(Value::as_str)
                .and_then(fields::parse_date)
        })
    }

    /// Returns the first candidate holding a non-empty string.
    pub fn text_field(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| {
            self.0
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        })
    }

    /// Resolves the key used by latest-record selection.
    ///
    /// Scans `Id`, `id`, `Date`, `date` in order and takes the first number
    /// or non-empty string found.
    pub fn sort_key(&self) -> SortKey {
        for key in SORT_KEYS {
            match self.0.get(*key) {
                Some(Value::Number(n)) => {
                    if let Some(n) = n.as_f64() {
                        return SortKey::Number(n);
                    }
                }
                Some(Value::String(s)) if !s.is_empty() => {
                    return SortKey::Text(s.clone());
                }
                _ => {}
            }
        }
        SortKey::Missing
    }

    /// Returns the id of the vehicle this record is tagged with, if any.
    pub fn vehicle_ref(&self) -> Option<i64> {
        self.first_present(VEHICLE_REF_KEYS).and_then(value_as_id)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Interprets a value as a vehicle id, accepting numeric strings.
pub(crate) fn value_as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

// ============================================================================
// Sort Keys & Selection
// ============================================================================

/// Ordering key for latest-record selection.
///
/// Records without a usable candidate sort below everything else, and
/// numbers sort below strings, so a batch with mixed key types still has
/// exactly one defined maximum.
#[derive(Debug, Clone)]
pub enum SortKey {
    /// No usable sort-key candidate was found.
    Missing,
    /// Numeric key (typically a record id).
    Number(f64),
    /// String key (typically an ISO date), compared lexicographically.
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Extracts the records from a decoded response body.
///
/// Anything that is not an array yields no records, and non-object elements
/// are skipped.
pub fn records_from_value(body: Value) -> Vec<Record> {
    match body {
        Value::Array(items) => items.into_iter().filter_map(Record::from_value).collect(),
        _ => Vec::new(),
    }
}

/// Picks the most recent record by sort key.
///
/// The maximum key wins; on ties the record listed later wins, so when every
/// key is missing the last record in server order is returned.
pub fn select_latest(records: Vec<Record>) -> Option<Record> {
    let mut best: Option<(SortKey, Record)> = None;
    for record in records {
        let key = record.sort_key();
        match &best {
            Some((best_key, _)) if key < *best_key => {}
            _ => best = Some((key, record)),
        }
    }
    best.map(|(_, record)| record)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn batch(value: Value) -> Vec<Record> {
        records_from_value(value)
    }

    #[test]
    fn test_select_latest_picks_max_id() {
        let latest = select_latest(batch(json!([
            {"Id": 1, "Notes": "first"},
            {"Id": 3, "Notes": "third"},
            {"Id": 2, "Notes": "second"},
        ])))
        .unwrap();
        assert_eq!(latest.get("Notes"), Some(&json!("third")));
    }

    #[test]
    fn test_select_latest_tie_keeps_later_record() {
        let latest = select_latest(batch(json!([
            {"Id": 5, "Notes": "early"},
            {"Id": 5, "Notes": "late"},
        ])))
        .unwrap();
        assert_eq!(latest.get("Notes"), Some(&json!("late")));
    }

    #[test]
    fn test_select_latest_falls_back_to_date() {
        let latest = select_latest(batch(json!([
            {"Date": "2024-01-03", "Notes": "newer"},
            {"Date": "2024-01-02", "Notes": "older"},
        ])))
        .unwrap();
        assert_eq!(latest.get("Notes"), Some(&json!("newer")));
    }

    #[test]
    fn test_select_latest_all_keys_missing_returns_last() {
        let latest = select_latest(batch(json!([
            {"Notes": "a"},
            {"Notes": "b"},
        ])))
        .unwrap();
        assert_eq!(latest.get("Notes"), Some(&json!("b")));
    }

    #[test]
    fn test_select_latest_empty_batch() {
        assert_eq!(select_latest(Vec::new()), None);
    }

    #[test]
    fn test_sort_key_skips_null_and_empty_candidates() {
        let record = Record::from_value(json!({
            "Id": null,
            "id": "",
            "Date": "2024-05-01",
        }))
        .unwrap();
        assert_eq!(record.sort_key(), SortKey::Text("2024-05-01".to_string()));
    }

    #[test]
    fn test_sort_key_zero_id_is_usable() {
        let record = Record::from_value(json!({"Id": 0})).unwrap();
        assert_eq!(record.sort_key(), SortKey::Number(0.0));
        assert!(record.sort_key() > SortKey::Missing);
    }

    #[test]
    fn test_mixed_key_types_numbers_sort_below_strings() {
        let latest = select_latest(batch(json!([
            {"Id": 99, "Notes": "numeric"},
            {"Date": "2020-01-01", "Notes": "dated"},
        ])))
        .unwrap();
        assert_eq!(latest.get("Notes"), Some(&json!("dated")));
    }

    #[test]
    fn test_records_from_value_non_array_bodies() {
        assert!(records_from_value(json!({"error": "nope"})).is_empty());
        assert!(records_from_value(json!("plain")).is_empty());
        assert!(records_from_value(json!(null)).is_empty());
    }

    #[test]
    fn test_records_from_value_skips_non_objects() {
        let records = batch(json!([1, {"Id": 1}, "x", null]));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_vehicle_ref_accepts_numeric_strings() {
        let record = Record::from_value(json!({"VehicleId": "7"})).unwrap();
        assert_eq!(record.vehicle_ref(), Some(7));
        let untagged = Record::from_value(json!({"Id": 1})).unwrap();
        assert_eq!(untagged.vehicle_ref(), None);
    }

    #[test]
    fn test_number_field_skips_unusable_candidates() {
        let record = Record::from_value(json!({
            "Odometer": "n/a",
            "Value": 120_934,
        }))
        .unwrap();
        assert_eq!(
            record.number_field(crate::fields::ODOMETER_VALUE_KEYS),
            Some(120_934.0)
        );
    }

    #[test]
    fn test_date_field_skips_unparseable_candidates() {
        let record = Record::from_value(json!({
            "NextDueDate": "whenever",
            "Date": "2025-03-01",
        }))
        .unwrap();
        let due = record
            .date_field(crate::fields::PLAN_DUE_DATE_KEYS)
            .unwrap();
        assert_eq!(due.to_rfc3339(), "2025-03-01T00:00:00+00:00");
    }
}
