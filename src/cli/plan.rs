use clap::Parser;

use crate::cli::settings::SettingsArgs;

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show pending downloads:\n    modsync plan\n\n\
                  Check a local manifest before publishing it:\n    modsync plan --manifest-url ./mods.json")]
pub struct PlanArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}
