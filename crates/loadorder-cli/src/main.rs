//! loadorder CLI
//!
//! Administrative view over descriptor resolution: loads a descriptor-set
//! file, resolves it and prints the order or the per-descriptor diagnostics.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} plugin load order resolver", "loadorder".green().bold());
            println!();
            println!("Run {} for available commands.", "loadorder --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve { file, json } => commands::run_resolve(&file, json),
        Commands::Inspect { file, json } => commands::run_inspect(&file, json),
        Commands::Check { file, strict } => commands::run_check(&file, strict),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
    if result.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}
