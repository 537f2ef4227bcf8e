//! # API Contracts Core
//!
//! Core data structures for declarative request contracts.
//!
//! A request contract states, per API operation, which fields a request must
//! carry, which it may carry, and what each field must look like. This crate
//! holds the contract data model and the registry that freezes contracts at
//! startup; validation and normalization live in `api_contracts_validator`.
//!
//! ## Key Concepts
//!
//! - **Contract**: required and optional field specs for one operation
//! - **FieldSpec**: type tag plus length/value bounds and enum options
//! - **Value**: a scalar request value (null, boolean, number, string)
//! - **ContractRegistry**: immutable, eagerly checked set of contracts
//!
//! ## Example
//!
//! ```rust
//! use api_contracts_core::{ContractBuilder, ContractRegistry, FieldSpec};
//!
//! let registry = ContractRegistry::builder()
//!     .register(
//!         ContractBuilder::new("banks.create")
//!             .method("POST")
//!             .uri("/banks")
//!             .required("name", FieldSpec::string().min_length(2).max_length(100))
//!             .required("type", FieldSpec::enumeration(["PRIVATE", "GOVERNMENT"]))
//!             .build(),
//!     )
//!     .build()
//!     .expect("contracts are well-formed");
//!
//! assert!(registry.get("banks.create").is_some());
//! ```

pub mod builder;
pub mod catalog;
pub mod contract;
pub mod error;
pub mod registry;
pub mod value;

pub use builder::*;
pub use contract::*;
pub use error::*;
pub use registry::*;
pub use value::*;
