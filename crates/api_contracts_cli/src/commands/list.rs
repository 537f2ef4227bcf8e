use anyhow::Result;

use crate::config::ContractSource;
use crate::output;

pub fn execute(source: &ContractSource) -> Result<()> {
    let registry = source.registry()?;
    output::print_operations(&registry);
    Ok(())
}
