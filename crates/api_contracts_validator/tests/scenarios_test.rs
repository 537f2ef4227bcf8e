//! End-to-end validation scenarios for the bank contract and single fields.
//!
//! Each test drives the public API the way a request handler would: decode a
//! JSON body, pick a contract, validate, and inspect either the normalized
//! record or the reported failure.

use api_contracts_core::{
    Contract, ContractBuilder, ErrorKind, FieldSpec, InputRecord, Value, record_from_json,
};
use api_contracts_validator::{RecordValidator, normalize, validate_field};
use pretty_assertions::assert_eq;
use serde_json::json;

fn bank_contract() -> Contract {
    ContractBuilder::new("banks.create")
        .required("name", FieldSpec::string().min_length(2).max_length(100))
        .required("type", FieldSpec::enumeration(["PRIVATE", "GOVERNMENT"]))
        .build()
}

fn input(body: serde_json::Value) -> InputRecord {
    record_from_json(body.as_object().expect("test body must be an object"))
        .expect("test body must hold scalars")
}

#[test]
fn test_valid_bank_is_normalized() {
    let normalized = RecordValidator::new()
        .validate(&input(json!({"name": "Test", "type": "private"})), &bank_contract())
        .unwrap();

    let expected = input(json!({"name": "Test", "type": "PRIVATE"}));
    assert_eq!(normalized, expected);
}

#[test]
fn test_missing_name_is_required() {
    let err = RecordValidator::new()
        .validate(&input(json!({"type": "PRIVATE"})), &bank_contract())
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Required);
    assert_eq!(err.field, "name");
}

#[test]
fn test_extra_field_is_unexpected() {
    let err = RecordValidator::new()
        .validate(
            &input(json!({"name": "Test", "type": "PRIVATE", "extra": 1})),
            &bank_contract(),
        )
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::UnexpectedField);
    assert_eq!(err.field, "extra");
}

#[test]
fn test_null_optional_is_omitted() {
    let contract = ContractBuilder::new("probe")
        .optional("optional", FieldSpec::string())
        .build();

    let normalized = RecordValidator::new()
        .validate(&input(json!({"optional": null})), &contract)
        .unwrap();

    assert!(normalized.is_empty());
}

#[test]
fn test_empty_input_for_empty_contract() {
    let contract = ContractBuilder::new("empty").build();
    let normalized = RecordValidator::new()
        .validate(&InputRecord::new(), &contract)
        .unwrap();
    assert!(normalized.is_empty());
}

#[test]
fn test_int_rejects_fraction_and_accepts_exact_float() {
    let spec = FieldSpec::int();

    let err = validate_field("age", &Value::Float(30.5), &spec).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidType);

    let value = Value::Float(30.0);
    assert!(validate_field("age", &value, &spec).is_ok());
    assert_eq!(normalize(&value, &spec), Value::Int(30));
}

#[test]
fn test_int_from_decoded_json() {
    let contract = ContractBuilder::new("probe")
        .required("age", FieldSpec::int())
        .build();

    let normalized = RecordValidator::new()
        .validate(&input(json!({"age": 30.0})), &contract)
        .unwrap();
    assert_eq!(normalized["age"], Value::Int(30));

    let err = RecordValidator::new()
        .validate(&input(json!({"age": 30.5})), &contract)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidType);
    assert_eq!(err.field, "age");
}

#[test]
fn test_uuid_is_lowercased() {
    let spec = FieldSpec::uuid();
    let value = Value::from("123E4567-E89B-12D3-A456-426614174000");

    assert!(validate_field("id", &value, &spec).is_ok());
    assert_eq!(
        normalize(&value, &spec),
        Value::from("123e4567-e89b-12d3-a456-426614174000")
    );
}

#[test]
fn test_string_length_boundary() {
    let spec = FieldSpec::string().min_length(2);

    let err = validate_field("name", &Value::from("A"), &spec).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TooShort);
    assert!(validate_field("name", &Value::from("AB"), &spec).is_ok());
}

#[test]
fn test_number_max_boundary() {
    let spec = FieldSpec::number().max_value(1000.00);

    assert!(validate_field("amount", &Value::Float(1000.00), &spec).is_ok());
    let err = validate_field("amount", &Value::Float(1000.01), &spec).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TooBig);
}

#[test]
fn test_zero_min_value_is_no_bound() {
    // min_value = 0 means "unbounded", so negative payments pass.
    let spec = FieldSpec::number().min_value(0.0);
    assert!(validate_field("min_payment", &Value::Float(-10.0), &spec).is_ok());
}

#[test]
fn test_nested_json_is_rejected_at_decode_time() {
    let err = record_from_json(json!({"name": ["a", "b"]}).as_object().unwrap()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidType);
    assert_eq!(err.field, "name");
}

#[test]
fn test_unsupported_type_surfaces_as_defect() {
    let contract = ContractBuilder::new("broken")
        .required("amount", FieldSpec::new("decimal"))
        .build();

    let report = RecordValidator::new().validate_all(&input(json!({"amount": 5})), &contract);
    assert!(!report.passed);
    assert!(report.has_configuration_defect());
    assert_eq!(report.errors[0].kind, ErrorKind::UnsupportedType);
}

#[test]
fn test_collect_all_first_error_matches_fail_fast() {
    let body = input(json!({"type": "public", "extra": true, "name": "X"}));
    let validator = RecordValidator::new();

    let fail_fast = validator.validate(&body, &bank_contract()).unwrap_err();
    let report = validator.validate_all(&body, &bank_contract());

    assert_eq!(report.errors.len(), 3);
    assert_eq!(report.first_error(), Some(&fail_fast));
    assert_eq!(report.into_result().unwrap_err(), fail_fast);
}
