//! # API Contracts Validator
//!
//! Validation and normalization engine for API request contracts. This crate
//! checks request records against the contracts defined with
//! `api_contracts_core`:
//!
//! - Field validation (type, length and value bounds, formats, enums)
//! - Record validation (required presence, optional fields, undeclared keys)
//! - Normalization into canonical values (trimmed, case-folded, numeric)
//! - Request validation with typed URI path parameters
//!
//! Everything here is synchronous and pure; contracts are only ever read.
//!
//! ## Example
//!
//! ```rust
//! use api_contracts_core::{catalog, record_from_json, Value};
//! use api_contracts_validator::RecordValidator;
//!
//! let registry = catalog::builtin_registry().unwrap();
//! let contract = registry.get("banks.create").unwrap();
//!
//! let body = serde_json::json!({"name": " Test ", "type": "private"});
//! let input = record_from_json(body.as_object().unwrap()).unwrap();
//!
//! let normalized = RecordValidator::new().validate(&input, &contract).unwrap();
//! assert_eq!(normalized["name"], Value::from("Test"));
//! assert_eq!(normalized["type"], Value::from("PRIVATE"));
//! ```

mod field;
mod normalize;
mod record;
mod report;
mod request;

pub use field::*;
pub use normalize::*;
pub use record::*;
pub use report::*;
pub use request::*;
