//! Dynamically-typed request values.
//!
//! Request bodies arrive as decoded JSON. Only scalars are part of the
//! contract domain, so [`Value`] models exactly null, boolean, number and
//! string, with numbers split into integers and floats.

use crate::{ErrorKind, FieldError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A single scalar value from a request record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl Value {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts a decoded JSON value into a [`Value`].
    ///
    /// Numbers that fit in an `i64` become [`Value::Int`], every other number
    /// becomes [`Value::Float`]. Arrays and objects are outside the request
    /// domain and are rejected as `InvalidType` for `field`.
    pub fn from_json(field: &str, json: &serde_json::Value) -> Result<Self, FieldError> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| {
                    FieldError::new(ErrorKind::InvalidType, field, "number out of range")
                }),
            },
            serde_json::Value::Array(_) => Err(FieldError::invalid_type(field, "scalar", "array")),
            serde_json::Value::Object(_) => {
                Err(FieldError::invalid_type(field, "scalar", "object"))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A raw request record, keyed by field name.
///
/// Ordered so that scans over input keys are deterministic.
pub type InputRecord = BTreeMap<String, Value>;

/// The canonical output of a successful validation.
pub type NormalizedRecord = BTreeMap<String, Value>;

/// Builds an [`InputRecord`] from a JSON object.
pub fn record_from_json(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<InputRecord, FieldError> {
    object
        .iter()
        .map(|(key, json)| Ok((key.clone(), Value::from_json(key, json)?)))
        .collect()
}
