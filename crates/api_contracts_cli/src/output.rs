use anyhow::Result;
use api_contracts_core::{Contract, ContractError, ContractRegistry};
use api_contracts_validator::ValidationReport;
use colored::*;
use serde_json::json;

pub fn print_validation_report(
    report: &ValidationReport,
    operation: &str,
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json_report(report, operation),
        _ => {
            print_text_report(report, operation);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport, operation: &str) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  VALIDATION REPORT: {}", operation).bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if let Some(normalized) = &report.normalized {
        println!("\n{}", "Normalized record:".bold());
        for (field, value) in normalized {
            println!("  {} = {}", field, value);
        }
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!(
                "  {}. [{}] {}",
                i + 1,
                error.kind.code(),
                error.to_string().red()
            );
        }
        if report.has_configuration_defect() {
            println!(
                "\n{}",
                "The contract itself is broken; fix its definition.".yellow()
            );
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Fields checked:    {}", report.stats.fields_checked);
    println!("  Fields normalized: {}", report.stats.fields_normalized);
    println!("  Total errors:      {}", report.errors.len());
    println!("  Duration:          {}µs", report.stats.duration_us);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport, operation: &str) -> Result<()> {
    let mut output = serde_json::to_value(report)?;
    output["operation"] = json!(operation);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_check_report(
    source: &str,
    contracts: &[Contract],
    defects: &[ContractError],
    format: &str,
) -> Result<()> {
    if format == "json" {
        let output = json!({
            "source": source,
            "passed": defects.is_empty(),
            "operations": contracts.iter().map(contract_json).collect::<Vec<_>>(),
            "defects": defects.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_info(&format!(
        "Loaded {} contracts from {}",
        contracts.len(),
        source
    ));

    println!("\nContracts:");
    for contract in contracts {
        println!(
            "  {:<20} {:<24} {} required, {} optional",
            contract.name,
            contract.route().unwrap_or_else(|| "-".to_string()),
            contract.required.len(),
            contract.optional.len()
        );
    }

    if defects.is_empty() {
        println!();
        print_success("All contract definitions are valid");
    } else {
        println!("\n{}", "Defects:".red().bold());
        for (i, defect) in defects.iter().enumerate() {
            println!("  {}. {}", i + 1, defect.to_string().red());
        }
        println!("\n  Total defects: {}", defects.len());
    }

    Ok(())
}

fn contract_json(contract: &Contract) -> serde_json::Value {
    json!({
        "name": contract.name,
        "method": contract.method,
        "uri": contract.uri,
        "required": contract.required.keys().collect::<Vec<_>>(),
        "optional": contract.optional.keys().collect::<Vec<_>>(),
    })
}

pub fn print_operations(registry: &ContractRegistry) {
    println!(
        "{}",
        format!("{:<20} {:<7} {:<22} {}", "OPERATION", "METHOD", "URI", "FIELDS").bold()
    );
    for contract in registry.iter() {
        let fields = contract
            .required
            .keys()
            .cloned()
            .chain(contract.optional.keys().map(|name| format!("{}?", name)))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<20} {:<7} {:<22} {}",
            contract.name,
            contract.method.as_deref().unwrap_or("-"),
            contract.uri.as_deref().unwrap_or("-"),
            fields
        );
    }
    println!("\n{} operations", registry.len());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
