//! Ready-made converters for [`Chain::try_map`](crate::chain::Chain::try_map).
//!
//! Every converter returns `Result<Value, ConversionError>`; the chain turns
//! an `Err` into a labelled failure.

use chrono::{DateTime, NaiveDate, Utc};

use super::error::ConversionError;
use crate::value::Value;

/// Renders a scalar as a string.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] for `Missing`, lists and
/// maps.
pub fn as_string(value: Value) -> Result<Value, ConversionError> {
    let text = match value {
        Value::String(s) => s,
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Float(x) => x.to_string(),
        Value::Date(d) => d.to_rfc3339(),
        other => return Err(ConversionError::unrepresentable(&other, "string")),
    };
    Ok(Value::String(text))
}

/// Converts to an integer.
///
/// Strings are parsed from their leading integer text (`"12px"` is 12),
/// floats are truncated towards zero and booleans become 1 or 0.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] for strings without a
/// leading integer, non-finite or out-of-range floats, and non-scalars.
pub fn as_integer(value: Value) -> Result<Value, ConversionError> {
    let parsed = match &value {
        Value::Integer(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(x) => truncate(*x),
        Value::String(s) => leading_integer(s),
        _ => None,
    };
    parsed
        .map(Value::Integer)
        .ok_or_else(|| ConversionError::unrepresentable(&value, "integer"))
}

/// Converts to a float.
///
/// Strings are parsed from their leading number text, like [`as_integer`]
/// (`"2.5kg"` is 2.5), integers widen and booleans become 1.0 or 0.0.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] for strings without a
/// leading number and non-scalars.
pub fn as_float(value: Value) -> Result<Value, ConversionError> {
    let parsed = match &value {
        Value::Float(x) => Some(*x),
        Value::Integer(n) => Some(widen(*n)),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        Value::String(s) => leading_float(s),
        _ => None,
    };
    parsed
        .map(Value::Float)
        .ok_or_else(|| ConversionError::unrepresentable(&value, "float"))
}

/// Converts to a date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` dates (midnight UTC) and
/// milliseconds since the Unix epoch. Fractional milliseconds are
/// truncated towards zero.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidDate`] for strings in neither format
/// and out-of-range timestamps, and [`ConversionError::Unrepresentable`]
/// for other kinds.
pub fn as_date(value: Value) -> Result<Value, ConversionError> {
    match value {
        Value::Date(d) => Ok(Value::Date(d)),
        Value::Integer(millis) => DateTime::from_timestamp_millis(millis)
            .map(Value::Date)
            .ok_or_else(|| ConversionError::InvalidDate(millis.to_string())),
        Value::Float(millis) => truncate(millis)
            .and_then(DateTime::from_timestamp_millis)
            .map(Value::Date)
            .ok_or_else(|| ConversionError::InvalidDate(millis.to_string())),
        Value::String(s) => parse_date(&s)
            .map(Value::Date)
            .ok_or(ConversionError::InvalidDate(s)),
        other => Err(ConversionError::unrepresentable(&other, "date")),
    }
}

/// Trims surrounding whitespace from a string.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] for non-strings.
pub fn trim(value: Value) -> Result<Value, ConversionError> {
    map_string(value, |s| s.trim().to_owned())
}

/// Upper-cases a string.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] for non-strings.
pub fn to_upper_case(value: Value) -> Result<Value, ConversionError> {
    map_string(value, str::to_uppercase)
}

/// Lower-cases a string.
///
/// # Errors
///
/// Returns [`ConversionError::Unrepresentable`] for non-strings.
pub fn to_lower_case(value: Value) -> Result<Value, ConversionError> {
    map_string(value, str::to_lowercase)
}

/// Parses a JSON string into a value.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidJson`] when the text is not JSON and
/// [`ConversionError::Unrepresentable`] for non-strings.
pub fn parse_json(value: Value) -> Result<Value, ConversionError> {
    match value {
        Value::String(text) => {
            let json: serde_json::Value = serde_json::from_str(&text)?;
            Ok(Value::from(json))
        }
        other => Err(ConversionError::unrepresentable(&other, "JSON text")),
    }
}

fn map_string(value: Value, f: impl Fn(&str) -> String) -> Result<Value, ConversionError> {
    match value {
        Value::String(s) => Ok(Value::String(f(&s))),
        other => Err(ConversionError::unrepresentable(&other, "string")),
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed
        .chars()
        .skip(sign_len)
        .take_while(char::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed.get(..sign_len + digits_len)?.parse().ok()
}

/// Parses the longest prefix of `text` (after leading whitespace) that reads
/// as a decimal number with optional fraction and exponent.
fn leading_float(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    if trimmed.get(sign_len..).is_some_and(|rest| rest.starts_with("Infinity")) {
        return trimmed.get(..sign_len + "Infinity".len())?.parse().ok();
    }

    let whole_len = digits_from(sign_len);
    let mut end = sign_len + whole_len;
    let mut mantissa_digits = whole_len;
    if bytes.get(end) == Some(&b'.') {
        let fraction_len = digits_from(end + 1);
        mantissa_digits += fraction_len;
        end += 1 + fraction_len;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exponent_sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_len = digits_from(end + 1 + exponent_sign);
        if exponent_len > 0 {
            end += 1 + exponent_sign + exponent_len;
        }
    }
    trimmed.get(..end)?.parse().ok()
}

const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

#[expect(
    clippy::cast_possible_truncation,
    reason = "the value is finite, already truncated and range-checked"
)]
fn truncate(x: f64) -> Option<i64> {
    let whole = x.trunc();
    (whole.is_finite() && (-I64_BOUND..I64_BOUND).contains(&whole)).then(|| whole as i64)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "widening to float is the documented conversion"
)]
fn widen(n: i64) -> f64 {
    n as f64
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}
