//! docbuild CLI - orchestrates versioned Sphinx documentation builds

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docbuild::BuildError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("docbuild=debug")
    } else {
        EnvFilter::new("docbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Build(args) => commands::build::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// A failed make run propagates its exact exit status; everything else
/// exits 1.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<BuildError>() {
        Some(BuildError::BuildToolFailed { status, .. }) => *status,
        _ => 1,
    }
}
