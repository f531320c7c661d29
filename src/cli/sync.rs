use clap::Parser;

use crate::cli::settings::{DownloadArgs, SettingsArgs};

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Sync using the settings file:\n    modsync sync\n\n\
                  Sync another mods directory:\n    modsync sync --mods-path /srv/arma3/mods\n\n\
                  Sync without a progress bar:\n    modsync sync --no-progress")]
pub struct SyncArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(flatten)]
    pub download: DownloadArgs,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}
