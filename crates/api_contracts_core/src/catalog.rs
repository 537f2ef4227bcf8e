//! Built-in contracts of the credits API.
//!
//! Banks, clients and credits each expose the usual five CRUD operations.
//! Path parameters (`{id}`) are declared as required `int` fields so they go
//! through the same validation as body fields.

use crate::{Contract, ContractBuilder, ContractRegistry, FieldSpec, RegistryBuilder, Result};

const BANK_TYPES: [&str; 2] = ["PRIVATE", "GOVERNMENT"];
const CREDIT_TYPES: [&str; 3] = ["AUTO", "MORTGAGE", "COMMERCIAL"];
const CREDIT_STATUSES: [&str; 3] = ["PENDING", "APPROVED", "REJECTED"];

fn id() -> FieldSpec {
    FieldSpec::int().min_value(1.0)
}

fn by_id(name: &str, method: &str, uri: &str) -> Contract {
    ContractBuilder::new(name)
        .method(method)
        .uri(uri)
        .required("id", id())
        .build()
}

fn bank_name() -> FieldSpec {
    FieldSpec::string().min_length(2).max_length(100)
}

fn bank_type() -> FieldSpec {
    FieldSpec::enumeration(BANK_TYPES)
}

/// Contracts for `/banks`.
pub fn banks() -> Vec<Contract> {
    vec![
        ContractBuilder::new("banks.create")
            .method("POST")
            .uri("/banks")
            .description("Create a bank")
            .required("name", bank_name())
            .required("type", bank_type())
            .build(),
        by_id("banks.get", "GET", "/banks/{id}"),
        ContractBuilder::new("banks.update")
            .method("PUT")
            .uri("/banks/{id}")
            .description("Update a bank")
            .required("id", id())
            .optional("name", bank_name())
            .optional("type", bank_type())
            .build(),
        by_id("banks.delete", "DELETE", "/banks/{id}"),
        ContractBuilder::new("banks.list")
            .method("GET")
            .uri("/banks")
            .optional("name", bank_name())
            .optional("type", bank_type())
            .build(),
    ]
}

fn client_fields() -> [(&'static str, FieldSpec); 4] {
    [
        ("full_name", FieldSpec::string().min_length(2).max_length(255)),
        ("email", FieldSpec::email()),
        ("birth_date", FieldSpec::date()),
        ("country", FieldSpec::string().min_length(2).max_length(100)),
    ]
}

/// Contracts for `/clients`.
pub fn clients() -> Vec<Contract> {
    let create = client_fields().into_iter().fold(
        ContractBuilder::new("clients.create")
            .method("POST")
            .uri("/clients")
            .description("Register a client"),
        |builder, (name, spec)| builder.required(name, spec),
    );

    vec![
        create.build(),
        by_id("clients.get", "GET", "/clients/{id}"),
        ContractBuilder::new("clients.update")
            .method("PUT")
            .uri("/clients/{id}")
            .description("Update a client")
            .required("id", id())
            .optionals(client_fields())
            .build(),
        by_id("clients.delete", "DELETE", "/clients/{id}"),
        ContractBuilder::new("clients.list")
            .method("GET")
            .uri("/clients")
            .optional("full_name", FieldSpec::string().min_length(2).max_length(255))
            .optional("email", FieldSpec::email())
            .optional("country", FieldSpec::string().min_length(2).max_length(100))
            .build(),
    ]
}

/// Contracts for `/credits`.
///
/// `min_payment` and `max_payment` keep the zero sentinel as their lower
/// bound, so negative payments are not rejected here.
pub fn credits() -> Vec<Contract> {
    vec![
        ContractBuilder::new("credits.create")
            .method("POST")
            .uri("/credits")
            .description("Request a credit")
            .required("client_id", FieldSpec::uuid())
            .required("bank_id", FieldSpec::uuid())
            .required("min_payment", FieldSpec::number())
            .required("max_payment", FieldSpec::number())
            .required("term_months", FieldSpec::int().min_value(1.0).max_value(360.0))
            .required("credit_type", FieldSpec::enumeration(CREDIT_TYPES))
            .build(),
        by_id("credits.get", "GET", "/credits/{id}"),
        ContractBuilder::new("credits.update")
            .method("PUT")
            .uri("/credits/{id}")
            .description("Update a credit")
            .required("id", id())
            .optional("min_payment", FieldSpec::number())
            .optional("max_payment", FieldSpec::number())
            .optional("term_months", FieldSpec::int().min_value(1.0).max_value(360.0))
            .optional("credit_type", FieldSpec::enumeration(CREDIT_TYPES))
            .optional("status", FieldSpec::enumeration(CREDIT_STATUSES))
            .build(),
        by_id("credits.delete", "DELETE", "/credits/{id}"),
        ContractBuilder::new("credits.list")
            .method("GET")
            .uri("/credits")
            .optional("client_id", FieldSpec::uuid())
            .optional("bank_id", FieldSpec::uuid())
            .optional("credit_type", FieldSpec::enumeration(CREDIT_TYPES))
            .optional("status", FieldSpec::enumeration(CREDIT_STATUSES))
            .build(),
    ]
}

/// Every built-in contract, unchecked.
pub fn builtin_contracts() -> Vec<Contract> {
    let mut contracts = banks();
    contracts.extend(clients());
    contracts.extend(credits());
    contracts
}

/// Builds the registry of built-in contracts.
pub fn builtin_registry() -> Result<ContractRegistry> {
    RegistryBuilder::new()
        .register_all(builtin_contracts())
        .build()
}
