//! Field-level checks
//!
//! Each rule looks at a single optional JSON value. JSON `null` is treated
//! the same as an absent field.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Text with at least one character
pub(crate) fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    present(value)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Text of any length, or nothing. Values of any other type are dropped.
pub(crate) fn optional_text(value: Option<&Value>) -> Option<String> {
    present(value).and_then(Value::as_str).map(str::to_string)
}

/// A number strictly greater than zero
pub(crate) fn positive_number(value: Option<&Value>) -> Option<f64> {
    present(value)
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// A whole number strictly greater than zero.
///
/// `328.0` is accepted as `328`; `327.5` is not.
pub(crate) fn positive_integer(value: Option<&Value>) -> Option<u32> {
    let n = present(value)?;
    if let Some(n) = n.as_u64() {
        return u32::try_from(n).ok().filter(|n| *n > 0);
    }

    let n = n.as_f64()?;
    if n.fract() != 0.0 || n <= 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}

/// Length of values that have one: characters of text, elements of arrays
pub(crate) fn length_of(value: Option<&Value>) -> Option<usize> {
    match present(value)? {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// A calendar date, given as `YYYY-MM-DD` or as an RFC 3339 timestamp
pub(crate) fn calendar_date(value: Option<&Value>) -> Option<NaiveDate> {
    let text = present(value)?.as_str()?.trim();

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Whether a value is set at all. Empty text counts as unset.
pub(crate) fn is_set(value: Option<&Value>) -> bool {
    match present(value) {
        None => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_empty_text() {
        assert_eq!(non_empty_text(Some(&json!("Dune"))), Some("Dune"));
        assert_eq!(non_empty_text(Some(&json!(""))), None);
        assert_eq!(non_empty_text(Some(&json!(42))), None);
        assert_eq!(non_empty_text(Some(&Value::Null)), None);
        assert_eq!(non_empty_text(None), None);
    }

    #[test]
    fn test_positive_number() {
        assert_eq!(positive_number(Some(&json!(13))), Some(13.0));
        assert_eq!(positive_number(Some(&json!(0.5))), Some(0.5));
        assert_eq!(positive_number(Some(&json!(0))), None);
        assert_eq!(positive_number(Some(&json!(-2))), None);
        assert_eq!(positive_number(Some(&json!("13"))), None);
    }

    #[test]
    fn test_positive_integer() {
        assert_eq!(positive_integer(Some(&json!(328))), Some(328));
        assert_eq!(positive_integer(Some(&json!(328.0))), Some(328));
        assert_eq!(positive_integer(Some(&json!(327.5))), None);
        assert_eq!(positive_integer(Some(&json!(0))), None);
        assert_eq!(positive_integer(Some(&json!(-1))), None);
        assert_eq!(positive_integer(Some(&json!("328"))), None);
    }

    #[test]
    fn test_length_of() {
        assert_eq!(length_of(Some(&json!("çà"))), Some(2));
        assert_eq!(length_of(Some(&json!([1, 2, 3]))), Some(3));
        assert_eq!(length_of(Some(&json!(12345))), None);
        assert_eq!(length_of(None), None);
    }

    #[test]
    fn test_calendar_date() {
        let expected = NaiveDate::from_ymd_opt(1903, 6, 25);
        assert_eq!(calendar_date(Some(&json!("1903-06-25"))), expected);
        assert_eq!(
            calendar_date(Some(&json!("1903-06-25T10:00:00Z"))),
            expected
        );
        assert_eq!(calendar_date(Some(&json!("1903-13-01"))), None);
        assert_eq!(calendar_date(Some(&json!("yesterday"))), None);
        assert_eq!(calendar_date(Some(&json!(19030625))), None);
    }

    #[test]
    fn test_is_set() {
        assert!(is_set(Some(&json!("Peru"))));
        assert!(is_set(Some(&json!(7))));
        assert!(!is_set(Some(&json!(""))));
        assert!(!is_set(Some(&Value::Null)));
        assert!(!is_set(None));
    }
}
