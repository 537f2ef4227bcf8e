//! Logging setup and contract source resolution.

use anyhow::{Context, Result};
use api_contracts_core::{Contract, ContractRegistry, RegistryBuilder, catalog};
use api_contracts_parser::load_contracts;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a log filter directive (e.g. `apic=debug`).
const LOG_ENV: &str = "APIC_LOG";

/// Installs the fmt subscriber on stderr so stdout stays machine-readable.
///
/// The filter comes from `APIC_LOG`, then `RUST_LOG`, then the verbosity flag.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .init();
}

/// Where contract definitions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractSource {
    /// The catalog compiled into the binary
    Builtin,
    /// A definition file or directory
    Path(PathBuf),
}

impl ContractSource {
    /// Picks the source from the `--contracts` flag (or `APIC_CONTRACTS`).
    pub fn resolve(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::Path(path),
            None => Self::Builtin,
        }
    }

    /// Human-readable name for messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Builtin => "built-in catalog".to_string(),
            Self::Path(path) => path.display().to_string(),
        }
    }

    /// Loads the contracts without checking them.
    pub fn contracts(&self) -> Result<Vec<Contract>> {
        match self {
            Self::Builtin => Ok(catalog::builtin_contracts()),
            Self::Path(path) => load_contracts(path).with_context(|| {
                format!("Failed to load contract definitions: {}", path.display())
            }),
        }
    }

    /// Loads the contracts and freezes them into a checked registry.
    pub fn registry(&self) -> Result<ContractRegistry> {
        let contracts = self.contracts()?;
        info!("Loading {} contracts from {}", contracts.len(), self.describe());
        RegistryBuilder::new()
            .register_all(contracts)
            .build()
            .with_context(|| format!("Invalid contract definitions in {}", self.describe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults_to_builtin() {
        assert_eq!(ContractSource::resolve(None), ContractSource::Builtin);
        assert_eq!(
            ContractSource::resolve(Some(PathBuf::from("contracts"))),
            ContractSource::Path(PathBuf::from("contracts"))
        );
    }

    #[test]
    fn test_builtin_registry_loads() {
        let registry = ContractSource::Builtin.registry().unwrap();
        assert_eq!(registry.len(), 15);
    }
}
