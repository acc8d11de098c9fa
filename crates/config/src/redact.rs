//! Safe-to-log configuration snapshots with secrets masked.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::Config;

/// Keys whose string values are always masked.
static SENSITIVE_KEYS: &[&str] = &[
    "openai_api_key",
    "vision_api_key",
    "api_key",
    "password",
    "secret",
    "token",
];

/// Values that look like bare API keys get masked regardless of key name.
static SECRET_VALUE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(sk-|AIza)[A-Za-z0-9_\-]{8,}$").unwrap());

/// Produce a JSON snapshot of `config` with every sensitive field replaced by
/// a first-four-characters hint. The result is safe to log at startup.
pub fn snapshot(config: &Config) -> Value {
    let value = serde_json::to_value(config).unwrap_or(Value::Null);
    redact_value(&value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k))
}

fn mask(s: &str) -> Value {
    let hint = if s.len() > 4 {
        format!("{}***", &s[..4])
    } else {
        "***".to_string()
    };
    Value::String(hint)
}

fn redact_value(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) => {
            if !s.is_empty() && (is_sensitive_key(key) || SECRET_VALUE_PATTERN.is_match(s)) {
                mask(s)
            } else {
                Value::String(s.clone())
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_value(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_value(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}
