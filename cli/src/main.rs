#![deny(missing_docs)]

//! # Swagger Canon CLI
//!
//! Command Line Interface for converting Swagger 2.0 documents into the
//! canonical project model.
//!
//! Supported Commands:
//! - `convert`: Swagger 2.0 (file or URL, JSON or YAML) -> canonical Project (JSON or YAML).

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod convert;
mod error;
mod source;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 to canonical API model converter")]
struct Cli {
    /// Log debug events to stderr (overridden by RUST_LOG).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Converts a Swagger 2.0 document into a canonical project.
    Convert(convert::ConvertArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Convert(args) => convert::execute(args)?,
    }

    Ok(())
}

/// Logs go to stderr so converted output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
