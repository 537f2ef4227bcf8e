mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apic")]
#[command(version, about = "API request contracts CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Contract definitions (YAML/TOML file or directory); built-in catalog if unset
    #[arg(short, long, global = true, env = "APIC_CONTRACTS")]
    contracts: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check contract definitions for configuration defects
    Check {
        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the registered operations
    List,

    /// Validate a JSON request body against an operation's contract
    Validate {
        /// Operation name (e.g. banks.create)
        operation: String,

        /// Path to the JSON request body
        input: PathBuf,

        /// URI path parameter as name=value (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// Collect every error instead of stopping at the first
        #[arg(short, long)]
        all: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    config::init_tracing(cli.verbose);
    let source = config::ContractSource::resolve(cli.contracts);

    match cli.command {
        Commands::Check { format } => commands::check::execute(&source, &format),

        Commands::List => commands::list::execute(&source),

        Commands::Validate {
            operation,
            input,
            params,
            all,
            format,
        } => commands::validate::execute(&source, &operation, &input, &params, all, &format),
    }
}
