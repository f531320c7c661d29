//! modsync - Steam Workshop mod synchronizer
//!
//! Keeps a dedicated game server's mods directory in sync with a manifest of
//! workshop items grouped into lines, and writes an index of the lines whose
//! items are all installed.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod cache;
mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod installer;
mod operations;
mod progress;
mod resolver;
mod temp;
#[cfg(test)]
mod test_fixtures;
mod transaction;
mod workshop;
mod workspace;

use cli::{Cli, Commands};

/// Route diagnostics to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sync(args) => commands::sync::run(cli.config, args, cli.verbose),
        Commands::Plan(args) => commands::plan::run(cli.config, args),
        Commands::Lines(args) => commands::lines::run(cli.config, args),
        Commands::Status(args) => commands::status::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  help: {help}");
        }
        std::process::exit(1);
    }
}
