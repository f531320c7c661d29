//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - settings: Settings overrides shared by every command
//! - sync: Sync command arguments
//! - plan: Plan command arguments
//! - lines: Lines command arguments
//! - status: Status command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod lines;
pub mod plan;
pub mod settings;
pub mod status;
pub mod sync;

pub use completions::CompletionsArgs;
pub use lines::LinesArgs;
pub use plan::PlanArgs;
pub use status::StatusArgs;
pub use sync::SyncArgs;

/// modsync - Steam Workshop mod synchronizer
///
/// Keeps a game server's mods directory in sync with a manifest of workshop items.
#[derive(Parser, Debug)]
#[command(
    name = "modsync",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Synchronize Steam Workshop mods for a game server",
    long_about = "modsync reads a manifest of mod lines, resolves every workshop item they need \
                  including dependencies, downloads new or updated items with steamcmd and writes \
                  an index of the lines whose items are all installed.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  modsync plan                   \x1b[90m# Show what would be downloaded\x1b[0m\n   \
                  modsync sync                   \x1b[90m# Download updates and rebuild the index\x1b[0m\n   \
                  modsync lines                  \x1b[90m# Rebuild the index only\x1b[0m\n   \
                  modsync status --json          \x1b[90m# Show installed items and lines\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Settings file (defaults to <config dir>/modsync/config.yaml)
    #[arg(long, short = 'c', global = true, env = "MODSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download new and updated items, then rebuild the lines index
    Sync(SyncArgs),

    /// Show what a sync would download without changing anything
    Plan(PlanArgs),

    /// Rebuild the lines index from installed items
    Lines(LinesArgs),

    /// Show installed items and lines
    Status(StatusArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_sync() {
        let cli = Cli::try_parse_from(["modsync", "sync"]).unwrap();
        assert!(matches!(cli.command, Commands::Sync(_)));
    }

    #[test]
    fn test_cli_parsing_sync_overrides() {
        let cli = Cli::try_parse_from([
            "modsync",
            "sync",
            "--mods-path",
            "/srv/arma/mods",
            "--manifest-url",
            "https://example.com/mods.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.settings.mods_path, Some(PathBuf::from("/srv/arma/mods")));
                assert_eq!(
                    args.settings.manifest_url.as_deref(),
                    Some("https://example.com/mods.json")
                );
            }
            _ => panic!("Expected Sync command"),
        }
    }

    #[test]
    fn test_cli_parsing_timeouts() {
        let cli = Cli::try_parse_from([
            "modsync",
            "sync",
            "--http-timeout-secs",
            "5",
            "--install-timeout-secs",
            "900",
        ])
        .unwrap();
        match cli.command {
            Commands::Sync(args) => {
                assert_eq!(args.settings.http_timeout_secs, Some(5));
                assert_eq!(args.download.install_timeout_secs, Some(900));
            }
            _ => panic!("Expected Sync command"),
        }
    }

    #[test]
    fn test_cli_parsing_status_json() {
        let cli = Cli::try_parse_from(["modsync", "status", "--json"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert!(args.json),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["modsync", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from(["modsync", "-v", "-c", "/tmp/modsync.yaml", "plan"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/modsync.yaml")));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["modsync", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["modsync", "install"]).is_err());
    }
}
