//! Per-value validation engine.
//!
//! Pure rule checking: a value is tested against a field type's rule set and
//! the first violation wins. A failed check is an expected outcome, returned
//! as a [`Validity`], never an error. Required-ness is deliberately not
//! checked here — it is a form-level concern handled at submission time.

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::format::{parse_datetime, parse_time, stringify};
use crate::registry::FieldTypeRegistry;
use crate::types::ValidationRules;

/// Outcome of validating one value: pass/fail plus a display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
    pub valid: bool,
    pub message: String,
}

impl Validity {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// Type-specific message for a pattern failure.
fn pattern_message(type_key: &str) -> &'static str {
    match type_key {
        "idcard" => "请输入正确的18位身份证号码",
        "mobile" => "请输入正确的11位手机号码",
        "email" => "请输入正确的邮箱地址",
        "phone" => "请输入正确的固定电话号码",
        "username" => "用户名只能包含字母、数字和下划线，长度3-20位",
        "realname" => "请输入正确的中文姓名",
        "url" => "请输入正确的网址链接",
        "password" => "密码长度应为6-20位",
        _ => "输入格式不正确",
    }
}

/// Character length of a value, where length checks make sense.
fn value_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    matches!(value, Value::Null) || matches!(value, Value::String(s) if s.is_empty())
}

/// Check a value against a rule set for the given type.
///
/// Checks run in a fixed order — empty pass, length, pattern, numeric
/// range, date parse — and return on the first failure.
pub fn validate_with_rules(value: &Value, type_key: &str, rules: &ValidationRules) -> Validity {
    // Empty always passes; required-ness is a form-level check.
    if is_empty(value) {
        return Validity::ok();
    }

    if let Some(len) = value_len(value) {
        if let Some(min) = rules.min_length {
            if len < min {
                return Validity::fail(format!("最少需要{min}个字符"));
            }
        }
        if let Some(max) = rules.max_length {
            if len > max {
                return Validity::fail(format!("最多允许{max}个字符"));
            }
        }
    }

    if let Some(pattern) = &rules.pattern {
        match Regex::new(pattern) {
            Ok(regex) => {
                if !regex.is_match(&stringify(value)) {
                    return Validity::fail(pattern_message(type_key));
                }
            }
            Err(error) => {
                // A broken pattern must not turn validation into a hard
                // failure; skip the check.
                warn!(%type_key, %error, "invalid validation pattern, skipping");
            }
        }
    }

    if type_key == "number" {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            other => stringify(other).trim().parse::<f64>().ok(),
        };
        let Some(n) = parsed.filter(|n| n.is_finite()) else {
            return Validity::fail("请输入有效的数字");
        };
        if let Some(min) = rules.min {
            if n < min {
                return Validity::fail(format!("数值不能小于{min}"));
            }
        }
        if let Some(max) = rules.max {
            if n > max {
                return Validity::fail(format!("数值不能大于{max}"));
            }
        }
    }

    match type_key {
        "date" | "datetime" => {
            if parse_datetime(&stringify(value)).is_none() {
                return Validity::fail("请输入有效的日期时间");
            }
        }
        "time" => {
            if parse_time(&stringify(value)).is_none() {
                return Validity::fail("请输入有效的日期时间");
            }
        }
        _ => {}
    }

    Validity::ok()
}

impl FieldTypeRegistry {
    /// Validate a value against a registered type's rules, with optional
    /// per-field rule overrides. Unknown types check nothing beyond the
    /// type-keyed numeric/date checks.
    pub fn validate_value(
        &self,
        value: &Value,
        type_key: &str,
        overrides: Option<&ValidationRules>,
    ) -> Validity {
        match overrides {
            Some(rules) => validate_with_rules(value, type_key, rules),
            None => {
                let default_rules = ValidationRules::default();
                let rules = self
                    .get(type_key)
                    .map(|def| &def.validation)
                    .unwrap_or(&default_rules);
                validate_with_rules(value, type_key, rules)
            }
        }
    }
}
