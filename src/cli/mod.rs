pub mod commands;
pub mod output;
pub mod render;

use clap::{Parser, Subcommand};

/// Terminal admin console for a certificate/license management backend.
#[derive(Parser, Debug)]
#[command(name = "certdeck", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend server base URL
    #[arg(long, global = true, env = "CERTDECK_SERVER")]
    pub server: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive console: live table with selection, detail panel,
    /// and batch deletion (polls the server every 10 seconds)
    Browse,

    /// Print one page of the certificate table
    List {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show the detail panel for one certificate
    Show {
        /// Common name of the certificate
        common_name: String,
    },

    /// Delete certificates after confirmation
    Delete {
        /// Common names to delete
        #[arg(required = true)]
        common_names: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Ask the backend to issue a new self-signed certificate
    Generate {
        /// Common name for the new certificate
        common_name: String,

        /// Validity period in days
        #[arg(long, default_value_t = 365)]
        days: u64,
    },
}
