//! Validation reports.

use api_contracts_core::{FieldError, NormalizedRecord};
use serde::Serialize;

/// Outcome of a collect-all validation run.
///
/// Errors appear in the order the fail-fast path would meet them, so
/// `errors[0]` is always the error [`RecordValidator::validate`](crate::RecordValidator::validate)
/// returns for the same input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether validation passed overall
    pub passed: bool,

    /// Normalized record, present only when validation passed
    pub normalized: Option<NormalizedRecord>,

    /// Field errors, in encounter order
    pub errors: Vec<FieldError>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Number of input fields examined
    pub fields_checked: usize,

    /// Number of fields that made it into the normalized record
    pub fields_normalized: usize,

    /// Validation duration in microseconds
    pub duration_us: u64,
}

impl ValidationReport {
    /// Creates a report from the pieces gathered by a validation run.
    pub fn new(
        normalized: NormalizedRecord,
        errors: Vec<FieldError>,
        stats: ValidationStats,
    ) -> Self {
        let passed = errors.is_empty();
        Self {
            passed,
            normalized: passed.then_some(normalized),
            errors,
            stats,
        }
    }

    /// The error a fail-fast run would have returned.
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    /// True if any error points at a broken contract.
    pub fn has_configuration_defect(&self) -> bool {
        self.errors.iter().any(FieldError::is_configuration_defect)
    }

    /// Converts the report into the fail-fast result shape.
    pub fn into_result(self) -> Result<NormalizedRecord, FieldError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.normalized.unwrap_or_default()),
        }
    }
}
