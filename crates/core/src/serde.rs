//! Serde helper functions for request deserialization.
//!
//! The page bound arrives from a form field, so it may be a JSON number, a
//! numeric string, or missing altogether.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::relay::PageBound;

/// Deserialize a page bound from any JSON value, falling back to the default.
pub fn deserialize_page_bound<'de, D>(deserializer: D) -> Result<PageBound, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.map_or(PageBound::DEFAULT, |v| coerce_page_bound(&v)))
}

/// Coerces a loosely typed value into a page bound using integer parsing.
///
/// Numbers are truncated toward zero and strings are read up to the first
/// non-digit. Negative values clamp to zero. Anything without a leading
/// integer yields [`PageBound::DEFAULT`].
pub fn coerce_page_bound(value: &Value) -> PageBound {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(n) if n <= 0 => PageBound::new(0),
        Some(n) => PageBound::new(u32::try_from(n).unwrap_or(u32::MAX)),
        None => PageBound::DEFAULT,
    }
}

/// Parses the integer prefix of `s`, skipping leading whitespace.
///
/// A `0x`/`0X` prefix after the optional sign switches to hexadecimal, so
/// `"0x10"` reads as 16. Returns `None` when no digit follows the prefix.
/// Values that do not fit in an `i64` saturate.
fn parse_leading_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
