//! groundwork - hybrid retrieval from the command line.

mod cli;
mod commands;
mod tracing_setup;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = commands::resolve_config(cli.config.as_deref())?;
    tracing_setup::init_tracing(&config.observability, cli.verbose, cli.json_logs);

    match &cli.command {
        Commands::Config => commands::show_config(&config),
        Commands::Search(args) => commands::search(&commands::build_engine(&config)?, args),
        Commands::Request(args) => commands::request(&commands::build_engine(&config)?, args),
    }
}
