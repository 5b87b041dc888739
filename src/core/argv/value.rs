//! Typed option values and string coercion.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest integer an f64 represents exactly; beyond it values stay floats.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A parsed option value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ArgValue {
    /// `false`, `0`, `NaN` and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ArgValue::Bool(b) => *b,
            ArgValue::Number(n) => *n != 0.0 && !n.is_nan(),
            ArgValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Number(value as f64)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

fn is_exact_integer(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Number(n) if is_exact_integer(*n) => write!(f, "{}", *n as i64),
            ArgValue::Number(n) => write!(f, "{}", n),
            ArgValue::Text(s) => f.write_str(s),
        }
    }
}

// Whole numbers serialize as JSON integers so `--port 8080` prints `8080`, not `8080.0`.
impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArgValue::Bool(b) => serializer.serialize_bool(*b),
            ArgValue::Number(n) if is_exact_integer(*n) => serializer.serialize_i64(*n as i64),
            ArgValue::Number(n) => serializer.serialize_f64(*n),
            ArgValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Coerce a raw value: the whole string must be a finite decimal number to
/// become `Number`, anything else is kept as `Text`.
pub fn coerce(raw: &str) -> ArgValue {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => ArgValue::Number(n),
        _ => ArgValue::Text(raw.to_string()),
    }
}
