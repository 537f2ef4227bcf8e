//! Field-level validation.
//!
//! [`validate_field`] decides whether one value satisfies one [`FieldSpec`].
//! It is a pure function: no I/O, no state, no allocation beyond the error.

use api_contracts_core::{ErrorKind, FieldError, FieldSpec, FieldType, Value};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .expect("uuid regex")
});
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date regex"));

/// Validates a single value against a field spec.
///
/// # Arguments
///
/// * `field` - Field name, used in the returned error
/// * `value` - The raw request value
/// * `spec` - The declared shape of the field
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ErrorKind, FieldSpec, Value};
/// use api_contracts_validator::validate_field;
///
/// let spec = FieldSpec::string().min_length(2);
/// assert!(validate_field("name", &Value::from("Test"), &spec).is_ok());
///
/// let err = validate_field("name", &Value::from(" T "), &spec).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::TooShort);
/// ```
pub fn validate_field(field: &str, value: &Value, spec: &FieldSpec) -> Result<(), FieldError> {
    match &spec.field_type {
        FieldType::String => {
            let s = expect_str(field, value, "string")?;
            check_length(field, s.trim().chars().count(), spec)
        }
        FieldType::Email => {
            let s = expect_str(field, value, "email string")?.trim();
            if EMAIL_RE.is_match(s) {
                Ok(())
            } else {
                Err(FieldError::new(
                    ErrorKind::InvalidFormat,
                    field,
                    format!("'{}' is not a valid email address", s),
                ))
            }
        }
        FieldType::Uuid => {
            let s = expect_str(field, value, "uuid string")?.trim();
            if UUID_RE.is_match(s) {
                Ok(())
            } else {
                Err(FieldError::new(
                    ErrorKind::InvalidFormat,
                    field,
                    format!("'{}' is not a valid UUID", s),
                ))
            }
        }
        FieldType::Date => {
            let s = expect_str(field, value, "date string")?.trim();
            if is_calendar_date(s) {
                Ok(())
            } else {
                Err(FieldError::new(
                    ErrorKind::InvalidFormat,
                    field,
                    format!("'{}' is not a YYYY-MM-DD date", s),
                ))
            }
        }
        FieldType::Int => {
            let n = exact_int(value).ok_or_else(|| match value {
                Value::Float(f) if f.is_finite() && f.fract() == 0.0 => FieldError::new(
                    ErrorKind::InvalidType,
                    field,
                    format!("integer out of range: {}", f),
                ),
                Value::Float(f) => FieldError::new(
                    ErrorKind::InvalidType,
                    field,
                    format!("expected integer, got non-integral number {}", f),
                ),
                other => FieldError::invalid_type(field, "integer", other.type_name()),
            })?;
            check_value(field, n as f64, spec)
        }
        FieldType::Number => {
            let n = match value {
                Value::Int(i) => *i as f64,
                Value::Float(f) if f.is_finite() => *f,
                Value::Float(f) => {
                    return Err(FieldError::new(
                        ErrorKind::InvalidType,
                        field,
                        format!("expected finite number, got {}", f),
                    ));
                }
                other => return Err(FieldError::invalid_type(field, "number", other.type_name())),
            };
            check_value(field, n, spec)
        }
        FieldType::Enum => {
            let token = expect_str(field, value, "enum string")?.trim().to_uppercase();
            if spec.options.iter().any(|option| *option == token) {
                Ok(())
            } else {
                Err(FieldError::new(
                    ErrorKind::InvalidEnum,
                    field,
                    format!("'{}' (allowed: {})", token, spec.options.join(", ")),
                ))
            }
        }
        FieldType::Unsupported(tag) => {
            error!(
                "Contract defect: field '{}' declares unsupported type '{}'",
                field, tag
            );
            Err(FieldError::new(
                ErrorKind::UnsupportedType,
                field,
                format!("type '{}' is not supported", tag),
            ))
        }
    }
}

/// Returns the value as an `i64` if it is an integer, or a finite float with
/// no fractional part that fits in `i64`.
pub fn exact_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        // 2^63 itself is not representable, hence the strict upper bound.
        Value::Float(f)
            if f.is_finite()
                && f.fract() == 0.0
                && *f >= i64::MIN as f64
                && *f < i64::MAX as f64 =>
        {
            Some(*f as i64)
        }
        _ => None,
    }
}

fn expect_str<'a>(field: &str, value: &'a Value, expected: &str) -> Result<&'a str, FieldError> {
    value
        .as_str()
        .ok_or_else(|| FieldError::invalid_type(field, expected, value.type_name()))
}

fn is_calendar_date(s: &str) -> bool {
    DATE_RE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn check_length(field: &str, length: usize, spec: &FieldSpec) -> Result<(), FieldError> {
    let (min, max) = spec.length_bounds();

    if let Some(min) = min {
        if length < min {
            return Err(FieldError::new(
                ErrorKind::TooShort,
                field,
                format!("min length {}, got {}", min, length),
            ));
        }
    }

    if let Some(max) = max {
        if length > max {
            return Err(FieldError::new(
                ErrorKind::TooLong,
                field,
                format!("max length {}, got {}", max, length),
            ));
        }
    }

    Ok(())
}

fn check_value(field: &str, n: f64, spec: &FieldSpec) -> Result<(), FieldError> {
    let (min, max) = spec.value_bounds();

    if let Some(min) = min {
        if n < min {
            return Err(FieldError::new(
                ErrorKind::TooSmall,
                field,
                format!("min value {}, got {}", min, n),
            ));
        }
    }

    if let Some(max) = max {
        if n > max {
            return Err(FieldError::new(
                ErrorKind::TooBig,
                field,
                format!("max value {}, got {}", max, n),
            ));
        }
    }

    Ok(())
}
