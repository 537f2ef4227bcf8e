//! Contract registry.
//!
//! Contracts are collected once at startup with a [`RegistryBuilder`], checked
//! eagerly, and frozen into a [`ContractRegistry`]. The registry is never
//! mutated afterwards; request handlers share it (or individual contracts via
//! `Arc`) without synchronization.

use crate::{Contract, ContractError, FieldSpec, FieldType, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Collects contracts before they are checked and frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    contracts: Vec<Contract>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a contract.
    pub fn register(mut self, contract: Contract) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Adds several contracts.
    pub fn register_all(mut self, contracts: impl IntoIterator<Item = Contract>) -> Self {
        self.contracts.extend(contracts);
        self
    }

    /// Number of contracts collected so far.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Returns every defect in the collected contracts, in registration order.
    pub fn audit(&self) -> Vec<ContractError> {
        let mut defects = Vec::new();
        let mut names = BTreeSet::new();
        let mut routes: BTreeMap<(String, String), &str> = BTreeMap::new();

        for contract in &self.contracts {
            if !names.insert(contract.name.as_str()) {
                defects.push(ContractError::DuplicateOperation(contract.name.clone()));
            }

            if let (Some(method), Some(uri)) = (&contract.method, &contract.uri) {
                let key = (method.to_uppercase(), uri.clone());
                if let Some(first) = routes.get(&key) {
                    defects.push(ContractError::DuplicateRoute {
                        method: key.0.clone(),
                        uri: key.1.clone(),
                        first: first.to_string(),
                        second: contract.name.clone(),
                    });
                } else {
                    routes.insert(key, contract.name.as_str());
                }
            }

            defects.extend(audit_contract(contract));
        }

        defects
    }

    /// Checks every contract and freezes the registry.
    ///
    /// Each defect is logged; the first one is returned.
    pub fn build(self) -> Result<ContractRegistry> {
        let defects = self.audit();
        for defect in &defects {
            error!("Contract definition defect: {}", defect);
        }
        if let Some(first) = defects.into_iter().next() {
            return Err(first);
        }

        let mut contracts = BTreeMap::new();
        let mut routes = BTreeMap::new();
        for contract in self.contracts {
            if let (Some(method), Some(uri)) = (&contract.method, &contract.uri) {
                routes.insert((method.to_uppercase(), uri.clone()), contract.name.clone());
            }
            debug!(
                "Registered contract '{}' ({} required, {} optional)",
                contract.name,
                contract.required.len(),
                contract.optional.len()
            );
            contracts.insert(contract.name.clone(), Arc::new(contract));
        }

        info!("Contract registry ready with {} operations", contracts.len());
        Ok(ContractRegistry { contracts, routes })
    }
}

/// Checks a single contract for definition defects.
pub fn audit_contract(contract: &Contract) -> Vec<ContractError> {
    let mut defects = Vec::new();

    for field in contract.required.keys() {
        if contract.optional.contains_key(field) {
            defects.push(ContractError::OverlappingField {
                operation: contract.name.clone(),
                field: field.clone(),
            });
        }
    }

    for param in contract.uri_params() {
        if !contract.declares(param) {
            defects.push(ContractError::UndeclaredPathParam {
                operation: contract.name.clone(),
                param: param.to_string(),
            });
        }
    }

    for (field, spec) in contract.fields() {
        defects.extend(audit_field(&contract.name, field, spec));
    }

    defects
}

fn audit_field(operation: &str, field: &str, spec: &FieldSpec) -> Vec<ContractError> {
    let mut defects = Vec::new();

    match &spec.field_type {
        FieldType::Unsupported(tag) => defects.push(ContractError::UnsupportedType {
            operation: operation.to_string(),
            field: field.to_string(),
            tag: tag.clone(),
        }),
        FieldType::Enum => {
            if spec.options.is_empty() {
                defects.push(ContractError::InvalidEnumOptions {
                    operation: operation.to_string(),
                    field: field.to_string(),
                    message: "no options declared".to_string(),
                });
            }
            for option in &spec.options {
                if *option != option.trim().to_uppercase() {
                    defects.push(ContractError::InvalidEnumOptions {
                        operation: operation.to_string(),
                        field: field.to_string(),
                        message: format!("option '{}' is not a trimmed upper-case token", option),
                    });
                }
            }
        }
        _ => {}
    }

    if let (Some(min), Some(max)) = spec.length_bounds() {
        if min > max {
            defects.push(ContractError::InvalidBounds {
                operation: operation.to_string(),
                field: field.to_string(),
                message: format!("min length {} exceeds max length {}", min, max),
            });
        }
    }

    for (label, bound) in [("min value", spec.min_value), ("max value", spec.max_value)] {
        if !bound.is_finite() {
            defects.push(ContractError::InvalidBounds {
                operation: operation.to_string(),
                field: field.to_string(),
                message: format!("{} {} is not a finite number", label, bound),
            });
        }
    }

    if let (Some(min), Some(max)) = spec.value_bounds() {
        if min.is_finite() && max.is_finite() && min > max {
            defects.push(ContractError::InvalidBounds {
                operation: operation.to_string(),
                field: field.to_string(),
                message: format!("min value {} exceeds max value {}", min, max),
            });
        }
    }

    defects
}

/// Immutable set of checked contracts, keyed by operation name.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<String, Arc<Contract>>,
    routes: BTreeMap<(String, String), String>,
}

impl ContractRegistry {
    /// Starts a new registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up a contract by operation name.
    pub fn get(&self, name: &str) -> Option<Arc<Contract>> {
        self.contracts.get(name).cloned()
    }

    /// Looks up a contract by HTTP method and URI template.
    pub fn find(&self, method: &str, uri: &str) -> Option<Arc<Contract>> {
        self.routes
            .get(&(method.to_uppercase(), uri.to_string()))
            .and_then(|name| self.get(name))
    }

    /// Operation names in sorted order.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    /// Iterates over contracts in operation-name order.
    pub fn iter(&self) -> impl Iterator<Item = &Contract> {
        self.contracts.values().map(Arc::as_ref)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// True if no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
