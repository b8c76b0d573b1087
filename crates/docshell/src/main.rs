//! docshell CLI - documentation site shell configuration.
//!
//! Provides commands for:
//! - `check`: Validate the site configuration and print a summary
//! - `dump`: Print the validated configuration as TOML or JSON
//! - `resolve`: Resolve navigation links against the base path

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{CheckArgs, DumpArgs, ResolveArgs};
use output::Output;

/// docshell - Documentation site shell configuration.
#[derive(Parser)]
#[command(name = "docshell", version, about)]
struct Cli {
    /// Enable verbose output (configuration load logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration.
    Check(CheckArgs),
    /// Print the validated configuration.
    Dump(DumpArgs),
    /// Resolve links against the configured base path.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Dump(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
