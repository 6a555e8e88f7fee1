mod adapters;
mod cli;
mod config;
mod core;

use std::path::Path;

use clap::Parser;

use crate::adapters::http::rest_directory::RestDirectory;
use crate::cli::{Cli, Commands};
use crate::config::app_config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::core::errors::Result;

fn main() {
    let args = Cli::parse();

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let config = AppConfig::load(Path::new(config_path))?;

    let server_url = config.resolve_server_url(args.server.as_deref());
    let timeout = config.resolve_timeout(args.timeout);
    let directory = RestDirectory::new(&server_url, timeout);

    match &args.command {
        Commands::Browse => cli::commands::browse::execute(&directory),
        Commands::List { page } => cli::commands::list::execute(&directory, *page),
        Commands::Show { common_name } => cli::commands::show::execute(&directory, common_name),
        Commands::Delete { common_names, yes } => {
            cli::commands::delete::execute(&directory, common_names, *yes)
        }
        Commands::Generate { common_name, days } => {
            cli::commands::generate::execute(&directory, common_name, *days)
        }
    }
}
