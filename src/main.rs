//! Credit approval pipeline - main entry point

use clap::Parser;
use colored::*;
use credit_approval::cli::{run, Cli};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_approval=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("  {} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
