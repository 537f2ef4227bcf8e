//! Canonical forms for validated values.

use crate::exact_int;
use api_contracts_core::{FieldSpec, FieldType, Value};

/// Converts an already validated value into its canonical form.
///
/// - `string`, `date`: trimmed
/// - `email`, `uuid`: trimmed and lower-cased
/// - `enum`: trimmed and upper-cased
/// - `int`: integer (exact floats are converted)
/// - `number`: float (integers are widened)
///
/// The value must have passed [`validate_field`](crate::validate_field) for
/// the same spec. A value that does not fit the spec is returned unchanged.
pub fn normalize(value: &Value, spec: &FieldSpec) -> Value {
    match (&spec.field_type, value) {
        (FieldType::String | FieldType::Date, Value::String(s)) => {
            Value::String(s.trim().to_string())
        }
        (FieldType::Email | FieldType::Uuid, Value::String(s)) => {
            Value::String(s.trim().to_lowercase())
        }
        (FieldType::Enum, Value::String(s)) => Value::String(s.trim().to_uppercase()),
        (FieldType::Int, _) => exact_int(value).map_or_else(|| value.clone(), Value::Int),
        (FieldType::Number, _) => value.as_float().map_or_else(|| value.clone(), Value::Float),
        _ => value.clone(),
    }
}
