//! CLI argument definitions using clap
//!
//! Commands:
//! - plaster serve --config <path>
//! - plaster permissions decode <value>
//! - plaster permissions scopes <scope>...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// plaster - object engine for a federated chat server
#[derive(Parser, Debug)]
#[command(name = "plaster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve JSON requests from stdin, one per line
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./plaster.json")]
        config: PathBuf,
    },

    /// Permission bitmask utilities
    Permissions {
        #[command(subcommand)]
        action: PermissionAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PermissionAction {
    /// Show the flags and scopes of a permission value
    Decode {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },

    /// Compute the permission value of OAuth scopes
    Scopes {
        /// Scope names; unknown names are ignored
        scopes: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
