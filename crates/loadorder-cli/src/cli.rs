//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// loadorder - Resolve and inspect plugin descriptor load orders
#[derive(Parser, Debug)]
#[command(name = "loadorder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the active descriptors of a descriptor set in load order
    ///
    /// Examples:
    ///   loadorder resolve pages.toml
    ///   loadorder resolve pages.toml --json
    Resolve {
        /// Descriptor-set TOML file
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show every descriptor with its state and exclusion reason
    Inspect {
        /// Descriptor-set TOML file
        file: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Verify that a descriptor set resolves
    ///
    /// Exits non-zero on an ordering cycle, a rejected duplicate, or an
    /// invalid file.
    Check {
        /// Descriptor-set TOML file
        file: PathBuf,

        /// Also fail when any descriptor is excluded
        #[arg(long)]
        strict: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::parse_from(["loadorder", "resolve", "pages.toml", "--json"]);
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                file: PathBuf::from("pages.toml"),
                json: true,
            })
        );
    }

    #[test]
    fn test_parse_check_strict_with_global_verbose() {
        let cli = Cli::parse_from(["loadorder", "check", "--strict", "pages.toml", "-v"]);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::Check {
                file: PathBuf::from("pages.toml"),
                strict: true,
            })
        );
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["loadorder"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
