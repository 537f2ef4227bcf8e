use anyhow::Result;
use api_contracts_core::RegistryBuilder;
use tracing::{error, info};

use crate::config::ContractSource;
use crate::output;

pub fn execute(source: &ContractSource, format: &str) -> Result<()> {
    info!("Checking contract definitions: {}", source.describe());

    let contracts = source.contracts()?;
    let defects = RegistryBuilder::new()
        .register_all(contracts.iter().cloned())
        .audit();

    for defect in &defects {
        error!("Contract definition defect: {}", defect);
    }

    output::print_check_report(&source.describe(), &contracts, &defects, format)?;

    if !defects.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
