use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

#[must_use]
pub fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Reads `text` as a point in time and returns its epoch millis.
///
/// Timestamps carrying an offset (RFC 3339, ISO 8601, `... UTC`) keep it.
/// Offset-free date-times and bare `YYYY-MM-DD` dates are wall-clock time in
/// `zone`, dates at midnight.
#[must_use]
pub fn parse_timestamp_millis(text: &str, zone: FixedOffset) -> Option<i64> {
    let text = text.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.timestamp_millis());
    }
    if let Some(time) = ZONED_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(time.timestamp_millis());
    }
    if let Some(naive) = text.strip_suffix(" UTC").and_then(parse_local_datetime) {
        return Some(Utc.from_utc_datetime(&naive).timestamp_millis());
    }

    let naive = parse_local_datetime(text).or_else(|| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })?;
    zone.from_local_datetime(&naive)
        .single()
        .map(|time| time.timestamp_millis())
}

fn parse_local_datetime(text: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Best-effort numeric coercion with `parseFloat` semantics.
///
/// Numbers pass through, strings are parsed from their longest numeric prefix,
/// everything else becomes `NaN`. Callers decide what `NaN` means for them.
#[must_use]
pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_float_prefix(text),
        Value::Array(items) if items.len() == 1 => to_float(&items[0]),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Parses the longest leading decimal literal of `text`, ignoring leading whitespace.
#[must_use]
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if trimmed[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if exponent_end < bytes.len() && matches!(bytes[exponent_end], b'+' | b'-') {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    trimmed[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Renders a number the way chart hosts print them (`1` rather than `1.0`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "Infinity".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_owned()
    } else if value == 0.0 {
        "0".to_owned()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_float_follows_parse_float_prefix_rules() {
        assert_eq!(to_float(&json!(12.5)), 12.5);
        assert_eq!(to_float(&json!("  42px")), 42.0);
        assert_eq!(to_float(&json!("-3.5e2abc")), -350.0);
        assert_eq!(to_float(&json!(".5")), 0.5);
        assert_eq!(to_float(&json!(["7"])), 7.0);
        assert!(to_float(&json!(null)).is_nan());
        assert!(to_float(&json!("abc")).is_nan());
        assert!(to_float(&json!(true)).is_nan());
        assert_eq!(to_float(&json!("-Infinity")), f64::NEG_INFINITY);
    }

    #[test]
    fn format_number_drops_trailing_zero_fraction() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1234.5), "1234.5");
    }
}
