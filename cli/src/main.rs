#![deny(missing_docs)]

//! # Routedoc CLI
//!
//! Command Line Interface that renders endpoint definition files into an
//! OpenAPI document.
//!
//! Supported Commands:
//! - `generate`: Definition files -> components + paths -> OpenAPI (JSON/YAML).

use clap::{Parser, Subcommand};
use routedoc_core::AppResult;
use tracing_subscriber::EnvFilter;

mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Endpoint definition to OpenAPI translator")]
struct Cli {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[clap(short, long, global = true, env = "ROUTEDOC_VERBOSE")]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an OpenAPI document from endpoint definition files.
    Generate(generate::GenerateArgs),
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    // Logs go to stderr so stdout stays clean for the document.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
    }

    Ok(())
}
