use clap::Parser;

use crate::cli::settings::SettingsArgs;

/// Arguments for the lines command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Rebuild modlines.json after editing the manifest:\n    modsync lines")]
pub struct LinesArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}
