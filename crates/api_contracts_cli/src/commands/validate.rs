use anyhow::{Context, Result, bail};
use api_contracts_core::{FieldError, InputRecord, NormalizedRecord};
use api_contracts_parser::{ParserError, parse_input_json};
use api_contracts_validator::{
    RecordValidator, ValidationReport, ValidationStats, merge_request, validate_request,
};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::config::ContractSource;
use crate::output;

pub fn execute(
    source: &ContractSource,
    operation: &str,
    input_path: &Path,
    raw_params: &[String],
    all: bool,
    format: &str,
) -> Result<()> {
    info!("Validating {} against '{}'", input_path.display(), operation);

    let registry = source.registry()?;
    let contract = registry.get(operation).with_context(|| {
        format!(
            "Unknown operation '{}' in {} (run `apic list` to see the available ones)",
            operation,
            source.describe()
        )
    })?;

    let params = parse_params(raw_params)?;
    let content = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read input file: {}", input_path.display()))?;

    let report = match parse_input_json(&content) {
        Ok(body) => {
            if all {
                match merge_request(&params, Some(&body), &contract) {
                    Ok(merged) => RecordValidator::new().validate_all(&merged, &contract),
                    Err(error) => rejected(error, &body),
                }
            } else {
                let start = Instant::now();
                let outcome = validate_request(&params, Some(&body), &contract);
                fail_fast_report(outcome, body.len() + params.len(), start)
            }
        }
        // Nested values are a caller error, not a broken input file.
        Err(ParserError::InputError(error)) => rejected(error, &InputRecord::new()),
        Err(err) => {
            return Err(err).with_context(|| {
                format!("Failed to parse input file: {}", input_path.display())
            });
        }
    };

    output::print_validation_report(&report, &contract.name, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Splits `name=value` arguments into path parameter pairs.
fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|param| match param.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => bail!("Invalid path parameter '{}': expected NAME=VALUE", param),
        })
        .collect()
}

fn fail_fast_report(
    outcome: Result<NormalizedRecord, FieldError>,
    fields_checked: usize,
    start: Instant,
) -> ValidationReport {
    let (normalized, errors) = match outcome {
        Ok(normalized) => (normalized, Vec::new()),
        Err(error) => (NormalizedRecord::new(), vec![error]),
    };
    let stats = ValidationStats {
        fields_checked,
        fields_normalized: normalized.len(),
        duration_us: start.elapsed().as_micros() as u64,
    };
    ValidationReport::new(normalized, errors, stats)
}

fn rejected(error: FieldError, body: &InputRecord) -> ValidationReport {
    let stats = ValidationStats {
        fields_checked: body.len(),
        ..ValidationStats::default()
    };
    ValidationReport::new(NormalizedRecord::new(), vec![error], stats)
}
