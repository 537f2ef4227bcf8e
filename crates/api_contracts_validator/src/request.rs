//! Whole-request validation: URI path parameters plus body.
//!
//! Path parameters always arrive as strings. Before they are validated they
//! are coerced according to the declared field type, so `/banks/42` satisfies
//! an `int` field while `/banks/abc` fails with `InvalidType`.

use crate::RecordValidator;
use api_contracts_core::{
    Contract, ErrorKind, FieldError, FieldSpec, FieldType, InputRecord, NormalizedRecord, Value,
};
use tracing::debug;

/// Coerces a raw path parameter into a [`Value`] for the given spec.
///
/// `int` and `number` fields get a numeric value when the text parses as one
/// (finite floats only). Anything else stays a string and is left for the
/// field validator to judge.
pub fn coerce_path_param(raw: &str, spec: &FieldSpec) -> Value {
    let trimmed = raw.trim();
    let parsed = match spec.field_type {
        FieldType::Int => trimmed.parse::<i64>().ok().map(Value::Int),
        FieldType::Number => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Float),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Validates only the path parameters of a request.
///
/// Every `{param}` of the contract's URI template must be supplied with a
/// non-empty value; parameters the contract does not declare are rejected.
pub fn validate_path_params<K, V>(
    params: &[(K, V)],
    contract: &Contract,
) -> Result<NormalizedRecord, FieldError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut normalized = NormalizedRecord::new();

    for expected in contract.uri_params() {
        let present = params
            .iter()
            .any(|(name, raw)| name.as_ref() == expected && !raw.as_ref().trim().is_empty());
        if !present {
            return Err(FieldError::required(expected));
        }
    }

    for (name, raw) in params {
        let (name, raw) = (name.as_ref(), raw.as_ref());
        let spec = contract
            .field(name)
            .ok_or_else(|| FieldError::unexpected(name))?;

        if raw.trim().is_empty() {
            return Err(FieldError::required(name));
        }

        let value = coerce_path_param(raw, spec);
        crate::validate_field(name, &value, spec)?;
        normalized.insert(name.to_string(), crate::normalize(&value, spec));
    }

    Ok(normalized)
}

/// Merges coerced path parameters into a copy of the body record.
///
/// Parameters the contract does not declare are rejected as
/// `UnexpectedField`, whatever their value. Empty values of declared
/// parameters are left out so the record validator reports them as missing.
/// A body key that repeats a path parameter is also `UnexpectedField`.
pub fn merge_request<K, V>(
    params: &[(K, V)],
    body: Option<&InputRecord>,
    contract: &Contract,
) -> Result<InputRecord, FieldError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut merged = body.cloned().unwrap_or_default();

    for (name, raw) in params {
        let (name, raw) = (name.as_ref(), raw.as_ref());
        if merged.contains_key(name) {
            return Err(FieldError::new(
                ErrorKind::UnexpectedField,
                name,
                "already supplied as a path parameter",
            ));
        }
        let Some(spec) = contract.field(name) else {
            return Err(FieldError::unexpected(name));
        };
        if raw.trim().is_empty() {
            continue;
        }
        merged.insert(name.to_string(), coerce_path_param(raw, spec));
    }

    Ok(merged)
}

/// Validates path parameters and body together.
///
/// The record built by [`merge_request`] is run through the
/// [`RecordValidator`], so a required `id` declared by the contract is
/// satisfied by the URI.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ContractBuilder, FieldSpec, InputRecord, Value};
/// use api_contracts_validator::validate_request;
///
/// let contract = ContractBuilder::new("banks.update")
///     .method("PUT")
///     .uri("/banks/{id}")
///     .required("id", FieldSpec::int().min_value(1.0))
///     .optional("name", FieldSpec::string().min_length(2))
///     .build();
///
/// let mut body = InputRecord::new();
/// body.insert("name".into(), Value::from(" New Name "));
///
/// let normalized = validate_request(&[("id", "42")], Some(&body), &contract).unwrap();
/// assert_eq!(normalized["id"], Value::Int(42));
/// assert_eq!(normalized["name"], Value::from("New Name"));
/// ```
pub fn validate_request<K, V>(
    params: &[(K, V)],
    body: Option<&InputRecord>,
    contract: &Contract,
) -> Result<NormalizedRecord, FieldError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let merged = merge_request(params, body, contract)?;

    debug!(
        "Operation '{}': validating request with {} path parameters and {} body fields",
        contract.name,
        params.len(),
        body.map_or(0, InputRecord::len)
    );

    RecordValidator::new().validate(&merged, contract)
}
