//! Error types for request contracts.
//!
//! Two families live here. [`FieldError`] is what a caller gets back when a
//! request record does not satisfy a contract; it always names the field and
//! carries an [`ErrorKind`]. [`ContractError`] describes defects in the
//! contract definitions themselves and is raised while a registry is built.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for contract definition operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Who is responsible for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The request carried data that violates the contract
    CallerInput,
    /// The contract itself is malformed
    ConfigurationDefect,
}

/// Classification of a field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field missing or null
    Required,
    /// Runtime type does not match the declared type
    InvalidType,
    /// String shorter than `min_length`
    TooShort,
    /// String longer than `max_length`
    TooLong,
    /// Number below `min_value`
    TooSmall,
    /// Number above `max_value`
    TooBig,
    /// String not among the declared options
    InvalidEnum,
    /// Email, UUID or date does not match its format
    InvalidFormat,
    /// Key not declared by the contract
    UnexpectedField,
    /// The field spec declares a type tag nobody understands
    UnsupportedType,
}

impl ErrorKind {
    /// Returns whether the failure is the caller's or the contract author's.
    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::UnsupportedType => ErrorClass::ConfigurationDefect,
            _ => ErrorClass::CallerInput,
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::TooShort => "too_short",
            ErrorKind::TooLong => "too_long",
            ErrorKind::TooSmall => "too_small",
            ErrorKind::TooBig => "too_big",
            ErrorKind::InvalidEnum => "invalid_enum",
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::UnexpectedField => "unexpected_field",
            ErrorKind::UnsupportedType => "unsupported_type",
        }
    }

    fn message(self) -> &'static str {
        match self {
            ErrorKind::Required => "Required field missing",
            ErrorKind::InvalidType => "Invalid type",
            ErrorKind::TooShort => "Value too short",
            ErrorKind::TooLong => "Value too long",
            ErrorKind::TooSmall => "Value too small",
            ErrorKind::TooBig => "Value too big",
            ErrorKind::InvalidEnum => "Invalid enum value",
            ErrorKind::InvalidFormat => "Invalid format",
            ErrorKind::UnexpectedField => "Unexpected field",
            ErrorKind::UnsupportedType => "Unsupported field type in contract",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} in field '{field}': {detail}")]
pub struct FieldError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Name of the offending field
    pub field: String,
    /// Human-readable detail
    pub detail: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(kind: ErrorKind, field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Creates a `Required` error.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(ErrorKind::Required, field, "field is missing or null")
    }

    /// Creates an `UnexpectedField` error.
    pub fn unexpected(field: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnexpectedField,
            field,
            "field is not declared by the contract",
        )
    }

    /// Creates an `InvalidType` error.
    pub fn invalid_type(
        field: impl Into<String>,
        expected: &str,
        actual: &str,
    ) -> Self {
        Self::new(
            ErrorKind::InvalidType,
            field,
            format!("expected {}, got {}", expected, actual),
        )
    }

    /// Returns the failure class of this error.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// True if the error points at a broken contract rather than bad input.
    pub fn is_configuration_defect(&self) -> bool {
        self.class() == ErrorClass::ConfigurationDefect
    }
}

/// Defects in contract definitions, detected when a registry is built.
#[derive(Error, Debug)]
pub enum ContractError {
    /// Two contracts share the same operation name
    #[error("Duplicate operation: {0}")]
    DuplicateOperation(String),

    /// Two contracts guard the same method and URI
    #[error("Duplicate route {method} {uri} (operations '{first}' and '{second}')")]
    DuplicateRoute {
        /// HTTP method
        method: String,
        /// URI template
        uri: String,
        /// Operation registered first
        first: String,
        /// Operation that collided
        second: String,
    },

    /// A field is declared both required and optional
    #[error("Field '{field}' of operation '{operation}' is declared both required and optional")]
    OverlappingField {
        /// Operation name
        operation: String,
        /// Field name
        field: String,
    },

    /// The URI template names a parameter the contract does not declare
    #[error("URI parameter '{{{param}}}' of operation '{operation}' is not declared as a field")]
    UndeclaredPathParam {
        /// Operation name
        operation: String,
        /// Parameter name from the URI template
        param: String,
    },

    /// A field spec declares an unrecognized type tag
    #[error("Unsupported type '{tag}' for field '{field}' of operation '{operation}'")]
    UnsupportedType {
        /// Operation name
        operation: String,
        /// Field name
        field: String,
        /// The unrecognized tag
        tag: String,
    },

    /// Enum options that can never match
    #[error("Invalid enum options for field '{field}' of operation '{operation}': {message}")]
    InvalidEnumOptions {
        /// Operation name
        operation: String,
        /// Field name
        field: String,
        /// Description of the problem
        message: String,
    },

    /// Lower bound above upper bound
    #[error("Invalid bounds for field '{field}' of operation '{operation}': {message}")]
    InvalidBounds {
        /// Operation name
        operation: String,
        /// Field name
        field: String,
        /// Description of the problem
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(ErrorKind::Required.class(), ErrorClass::CallerInput);
        assert_eq!(ErrorKind::InvalidFormat.class(), ErrorClass::CallerInput);
        assert_eq!(
            ErrorKind::UnsupportedType.class(),
            ErrorClass::ConfigurationDefect
        );
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new(ErrorKind::TooShort, "name", "min length 2, got 1");
        assert_eq!(
            err.to_string(),
            "Value too short in field 'name': min length 2, got 1"
        );
        assert!(!err.is_configuration_defect());
    }

    #[test]
    fn test_field_error_serializes_code() {
        let err = FieldError::required("name");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "required");
        assert_eq!(json["field"], "name");
    }
}
