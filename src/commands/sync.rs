//! Sync command implementation
//!
//! Wires the workshop catalog, the manifest loader and the steamcmd
//! installer into a sync run over the configured mods directory.

use std::path::PathBuf;

use crate::cli::SyncArgs;
use crate::commands::helpers::{fetch_cache, load_settings, log_cache_stats};
use crate::config::{ManifestLoader, Requirements};
use crate::error::{Result, config};
use crate::installer::{SteamCmdInstaller, SteamCmdOptions};
use crate::operations::sync::display::print_report;
use crate::operations::{SyncOperation, SyncOptions};
use crate::workshop::WorkshopCatalog;
use crate::workspace::ModsDir;

/// Run sync command
pub fn run(config_path: Option<PathBuf>, args: SyncArgs, verbose: bool) -> Result<()> {
    let overrides = args.download.apply(args.settings.overrides());
    let settings = load_settings(config_path.as_deref(), overrides, Requirements::SYNC)?;
    let credentials = settings
        .credentials
        .clone()
        .ok_or_else(|| config::missing("username"))?;

    let mut mods = ModsDir::open_or_init(&settings.mods_path)?;

    let cache = fetch_cache(&settings);
    let catalog = WorkshopCatalog::new(&cache);
    let manifests = ManifestLoader::new(settings.manifest_location()?.clone(), &cache);
    let installer = SteamCmdInstaller::new(SteamCmdOptions {
        steamcmd_path: settings.steamcmd_path.clone(),
        download_path: settings.download_path.clone(),
        mods_path: settings.mods_path.clone(),
        keys_path: settings.keys_path.clone(),
        credentials,
        app_id: settings.app_id,
        attempts: settings.install_attempts,
        timeout: settings.install_timeout,
        verbose,
    });

    let options = SyncOptions {
        show_progress: !args.no_progress && !verbose && console::Term::stderr().is_term(),
    };
    let report =
        SyncOperation::new(&mut mods, &catalog, &manifests, &installer, options).execute()?;

    print_report(&report);
    log_cache_stats(&cache);
    Ok(())
}
