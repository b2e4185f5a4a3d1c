//! Display formatting and date parsing.
//!
//! Formatters render a raw value for display (spaced id-card and mobile
//! numbers, date rendering, checkbox lists). The parse helpers here are also
//! what the validation engine and the runtime submission pass use to decide
//! whether a date-like value is acceptable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use crate::registry::FieldTypeRegistry;
use crate::types::Formatter;

/// Space an 18-digit id-card number as 6/4/4/4, progressively for
/// partial input. Existing whitespace is stripped first.
pub fn format_idcard(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let chars: Vec<char> = cleaned.chars().collect();
    let n = chars.len();
    if n <= 6 {
        return cleaned;
    }
    let slice = |from: usize, to: usize| chars[from..to.min(n)].iter().collect::<String>();
    if n <= 10 {
        return format!("{} {}", slice(0, 6), slice(6, n));
    }
    if n <= 14 {
        return format!("{} {} {}", slice(0, 6), slice(6, 10), slice(10, n));
    }
    format!(
        "{} {} {} {}",
        slice(0, 6),
        slice(6, 10),
        slice(10, 14),
        slice(14, n)
    )
}

/// Space an 11-digit mobile number as 3/4/4, progressively for partial input.
pub fn format_mobile(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let chars: Vec<char> = cleaned.chars().collect();
    let n = chars.len();
    if n <= 3 {
        return cleaned;
    }
    let slice = |from: usize, to: usize| chars[from..to.min(n)].iter().collect::<String>();
    if n <= 7 {
        return format!("{} {}", slice(0, 3), slice(3, n));
    }
    format!("{} {} {}", slice(0, 3), slice(3, 7), slice(7, n))
}

/// Apply a named formatter to a raw string value.
pub fn apply_formatter(formatter: Formatter, value: &str) -> String {
    match formatter {
        Formatter::Idcard => format_idcard(value),
        Formatter::Mobile => format_mobile(value),
    }
}

/// Parse a date or datetime string leniently.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:mm[:ss]`, `YYYY/MM/DD HH:mm[:ss]` and
/// bare dates (taken as midnight).
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parse a time-of-day string (`HH:mm` or `HH:mm:ss`).
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    for format in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(value, format) {
            return Some(time);
        }
    }
    None
}

/// Render a datetime through a `YYYY-MM-DD HH:mm:ss` style pattern.
///
/// Supported tokens: `YYYY`, `MM`, `DD`, `HH`, `mm`, `ss`. Unknown text is
/// passed through verbatim.
pub fn format_date_pattern(dt: &NaiveDateTime, pattern: &str) -> String {
    pattern
        .replace("YYYY", &dt.format("%Y").to_string())
        .replace("MM", &dt.format("%m").to_string())
        .replace("DD", &dt.format("%d").to_string())
        .replace("HH", &dt.format("%H").to_string())
        .replace("mm", &dt.format("%M").to_string())
        .replace("ss", &dt.format("%S").to_string())
}

/// Render a raw string representation of a JSON value, the way a form
/// control would show it.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Format a field value for display.
///
/// Dispatches to the type's named formatter when it has one, otherwise
/// renders date-like types through their display format and joins checkbox
/// selections with `", "`. Empty values render as the empty string.
pub fn format_value(value: &Value, type_key: &str, registry: &FieldTypeRegistry) -> String {
    if matches!(value, Value::Null) || matches!(value, Value::String(s) if s.is_empty()) {
        return String::new();
    }

    let def = registry.get(type_key);
    if let Some(formatter) = def.and_then(|d| d.formatter) {
        return apply_formatter(formatter, &stringify(value));
    }

    let raw = stringify(value);
    match type_key {
        "date" => parse_datetime(&raw)
            .map(|dt| format_date_pattern(&dt, "YYYY-MM-DD"))
            .unwrap_or(raw),
        "datetime" => parse_datetime(&raw)
            .map(|dt| format_date_pattern(&dt, "YYYY-MM-DD HH:mm:ss"))
            .unwrap_or(raw),
        "time" => parse_time(&raw)
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or(raw),
        _ => raw,
    }
}
