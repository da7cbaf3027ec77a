use std::fmt;

/// Kind of a flag value, as seen by the typed variation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A boolean value.
    Boolean,
    /// A string value.
    String,
    /// A number without a fractional part.
    Integer,
    /// Any other number.
    Float,
    /// Null, arrays and objects. Only the JSON variation accepts these.
    Json,
}

impl ValueKind {
    /// Determine the kind of a configured value.
    pub fn of(value: &serde_json::Value) -> ValueKind {
        match value {
            serde_json::Value::Bool(_) => ValueKind::Boolean,
            serde_json::Value::String(_) => ValueKind::String,
            serde_json::Value::Number(n) => {
                if as_integer(n).is_some() {
                    ValueKind::Integer
                } else {
                    ValueKind::Float
                }
            }
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => ValueKind::Json,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Json => "json",
        };
        f.write_str(s)
    }
}

/// Integral numbers are accepted even when encoded as floats (`42.0`).
fn as_integer(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub(crate) fn to_bool(value: &serde_json::Value) -> Option<bool> {
    value.as_bool()
}

pub(crate) fn to_string(value: &serde_json::Value) -> Option<String> {
    value.as_str().map(ToOwned::to_owned)
}

pub(crate) fn to_integer(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => as_integer(n),
        _ => None,
    }
}

pub(crate) fn to_float(value: &serde_json::Value) -> Option<f64> {
    value.as_f64()
}

pub(crate) fn to_json(value: &serde_json::Value) -> Option<serde_json::Value> {
    Some(value.clone())
}
