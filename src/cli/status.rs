use clap::Parser;

use crate::cli::settings::SettingsArgs;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show installed items and lines:\n    modsync status\n\n\
                  Machine-readable output:\n    modsync status --json")]
pub struct StatusArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Print the state as JSON
    #[arg(long)]
    pub json: bool,
}
