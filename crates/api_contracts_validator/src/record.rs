//! Record-level validation.
//!
//! This module checks a whole request record against a [`Contract`]:
//! presence of required fields, conformance of every supplied field, and
//! rejection of keys the contract does not declare.

use crate::{ValidationReport, ValidationStats, normalize, validate_field};
use api_contracts_core::{Contract, FieldError, FieldSpec, InputRecord, NormalizedRecord, Value};
use std::time::Instant;
use tracing::{debug, warn};

/// Validates request records against contracts.
///
/// Fields are visited in a fixed order: required fields by name, then
/// optional fields by name, then every input key by name for the
/// undeclared-field sweep. The same input therefore always reports the same
/// first error.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ContractBuilder, FieldSpec, InputRecord, Value};
/// use api_contracts_validator::RecordValidator;
///
/// let contract = ContractBuilder::new("banks.create")
///     .required("name", FieldSpec::string().min_length(2).max_length(100))
///     .required("type", FieldSpec::enumeration(["PRIVATE", "GOVERNMENT"]))
///     .build();
///
/// let mut input = InputRecord::new();
/// input.insert("name".into(), Value::from("Test"));
/// input.insert("type".into(), Value::from("private"));
///
/// let normalized = RecordValidator::new().validate(&input, &contract).unwrap();
/// assert_eq!(normalized["type"], Value::from("PRIVATE"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator;

impl RecordValidator {
    /// Creates a new record validator.
    pub fn new() -> Self {
        Self
    }

    /// Validates a record and stops at the first failure.
    ///
    /// Returns the normalized record, which holds every required field and
    /// every optional field that was supplied with a non-null value.
    pub fn validate(
        &self,
        input: &InputRecord,
        contract: &Contract,
    ) -> Result<NormalizedRecord, FieldError> {
        let mut errors = Vec::with_capacity(1);
        let normalized = self.run(input, contract, &mut errors, true);
        match errors.pop() {
            Some(error) => Err(error),
            None => Ok(normalized),
        }
    }

    /// Validates a record and collects every failure.
    pub fn validate_all(&self, input: &InputRecord, contract: &Contract) -> ValidationReport {
        let start = Instant::now();
        let mut errors = Vec::new();
        let normalized = self.run(input, contract, &mut errors, false);

        let stats = ValidationStats {
            fields_checked: input.len(),
            fields_normalized: normalized.len(),
            duration_us: start.elapsed().as_micros() as u64,
        };

        ValidationReport::new(normalized, errors, stats)
    }

    /// Walks the three passes. In fail-fast mode at most one error is pushed.
    fn run(
        &self,
        input: &InputRecord,
        contract: &Contract,
        errors: &mut Vec<FieldError>,
        fail_fast: bool,
    ) -> NormalizedRecord {
        let mut normalized = NormalizedRecord::new();

        for (field, spec) in &contract.required {
            let outcome = match supplied(input, field) {
                Some(value) => check(field, value, spec),
                None => Err(FieldError::required(field)),
            };
            if !self.store(contract, field, outcome, &mut normalized, errors) && fail_fast {
                return normalized;
            }
        }

        for (field, spec) in &contract.optional {
            let Some(value) = supplied(input, field) else {
                continue;
            };
            let outcome = check(field, value, spec);
            if !self.store(contract, field, outcome, &mut normalized, errors) && fail_fast {
                return normalized;
            }
        }

        for field in input.keys() {
            if contract.declares(field) {
                continue;
            }
            warn!(
                "Operation '{}': rejecting undeclared field '{}'",
                contract.name, field
            );
            errors.push(FieldError::unexpected(field));
            if fail_fast {
                return normalized;
            }
        }

        normalized
    }

    /// Stores a field outcome. Returns false if the field was rejected.
    fn store(
        &self,
        contract: &Contract,
        field: &str,
        outcome: Result<Value, FieldError>,
        normalized: &mut NormalizedRecord,
        errors: &mut Vec<FieldError>,
    ) -> bool {
        match outcome {
            Ok(value) => {
                normalized.insert(field.to_string(), value);
                true
            }
            Err(error) => {
                debug!("Operation '{}': {}", contract.name, error);
                errors.push(error);
                false
            }
        }
    }
}

/// Returns the value of a key unless it is absent or null.
fn supplied<'a>(input: &'a InputRecord, field: &str) -> Option<&'a Value> {
    input.get(field).filter(|value| !value.is_null())
}

fn check(field: &str, value: &Value, spec: &FieldSpec) -> Result<Value, FieldError> {
    validate_field(field, value, spec)?;
    Ok(normalize(value, spec))
}

/// Validates a record with a default [`RecordValidator`].
pub fn validate(input: &InputRecord, contract: &Contract) -> Result<NormalizedRecord, FieldError> {
    RecordValidator::new().validate(input, contract)
}
