//! Lenient numeric parsing for form-style inputs
//!
//! Inputs arrive as JSON numbers or as strings. Parsing reads an optional
//! sign and the leading digits and ignores the rest ("12 attacks" is 12).
//! Counts treat an unparseable *or zero* value as missing and use the
//! default instead.

use serde::{Deserialize, Serialize};

/// A number that may have been sent as a number or as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericInput {
    /// Integer value, truncating floats and reading the leading digits of text
    pub fn as_int(&self) -> Option<i64> {
        match self {
            NumericInput::Integer(i) => Some(*i),
            NumericInput::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            NumericInput::Float(_) => None,
            NumericInput::Text(s) => parse_int_prefix(s),
        }
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Integer(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Parse an optional sign followed by at least one digit
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Count with fallback: missing, unparseable or zero gives `default`
pub fn lenient_count(input: Option<&NumericInput>, default: i64) -> i64 {
    match input.and_then(NumericInput::as_int) {
        Some(0) | None => default,
        Some(value) => value,
    }
}

/// Stat with fallback: missing or unparseable gives `default`
pub fn lenient_stat(input: Option<&NumericInput>, default: i64) -> i64 {
    input.and_then(NumericInput::as_int).unwrap_or(default)
}

/// Optional stat: missing, empty, unparseable or zero means "not present"
pub fn optional_stat(input: Option<&NumericInput>) -> Option<i64> {
    input.and_then(NumericInput::as_int).filter(|&value| value != 0)
}

/// Narrow to `i32`, saturating at the bounds
pub fn saturating_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Narrow to `u32`, negatives become 0
pub fn saturating_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
