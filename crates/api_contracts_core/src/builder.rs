//! Builder pattern for creating request contracts.
//!
//! Contracts are static tables in practice, so the builder is the usual way to
//! write them down in code. Structural problems such as a field declared
//! twice are not rejected here; [`RegistryBuilder::build`](crate::RegistryBuilder::build)
//! checks every contract eagerly.

use crate::{Contract, FieldSpec};
use std::collections::BTreeMap;

/// Builder for creating a [`Contract`].
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ContractBuilder, FieldSpec};
///
/// let contract = ContractBuilder::new("banks.update")
///     .method("PUT")
///     .uri("/banks/{id}")
///     .description("Update a bank")
///     .required("id", FieldSpec::int().min_value(1.0))
///     .optional("name", FieldSpec::string().min_length(2).max_length(100))
///     .build();
///
/// assert_eq!(contract.uri_params(), vec!["id"]);
/// ```
#[derive(Debug, Default)]
pub struct ContractBuilder {
    name: String,
    method: Option<String>,
    uri: Option<String>,
    description: Option<String>,
    required: BTreeMap<String, FieldSpec>,
    optional: BTreeMap<String, FieldSpec>,
}

impl ContractBuilder {
    /// Creates a new contract builder for the named operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the URI template.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the contract description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares a required field.
    pub fn required(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.required.insert(name.into(), spec);
        self
    }

    /// Declares an optional field.
    pub fn optional(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.optional.insert(name.into(), spec);
        self
    }

    /// Declares several optional fields at once.
    pub fn optionals<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldSpec)>,
        S: Into<String>,
    {
        self.optional
            .extend(fields.into_iter().map(|(name, spec)| (name.into(), spec)));
        self
    }

    /// Builds the contract.
    pub fn build(self) -> Contract {
        Contract {
            name: self.name,
            method: self.method,
            uri: self.uri,
            description: self.description,
            required: self.required,
            optional: self.optional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldType;

    #[test]
    fn test_builder_minimal() {
        let contract = ContractBuilder::new("health").build();
        assert_eq!(contract.name, "health");
        assert_eq!(contract.method, None);
        assert_eq!(contract.field_count(), 0);
    }

    #[test]
    fn test_builder_full() {
        let contract = ContractBuilder::new("clients.create")
            .method("POST")
            .uri("/clients")
            .description("Register a client")
            .required("email", FieldSpec::email())
            .required("birth_date", FieldSpec::date())
            .optionals([("country", FieldSpec::string().min_length(2))])
            .build();

        assert_eq!(contract.method.as_deref(), Some("POST"));
        assert_eq!(contract.description.as_deref(), Some("Register a client"));
        assert_eq!(contract.required["email"].field_type, FieldType::Email);
        assert_eq!(contract.optional["country"].min_length, 2);
    }

    #[test]
    fn test_builder_keeps_later_declaration() {
        let contract = ContractBuilder::new("x")
            .required("a", FieldSpec::string())
            .required("a", FieldSpec::int())
            .build();
        assert_eq!(contract.required["a"].field_type, FieldType::Int);
    }
}
