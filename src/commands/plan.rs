//! Plan command implementation

use std::path::PathBuf;

use crate::cli::PlanArgs;
use crate::commands::helpers::{fetch_cache, load_settings, log_cache_stats};
use crate::config::{ManifestLoader, Requirements};
use crate::error::Result;
use crate::operations::plan;
use crate::operations::sync::display::print_plan;
use crate::workshop::WorkshopCatalog;
use crate::workspace::ModsDir;

/// Run plan command
pub fn run(config_path: Option<PathBuf>, args: PlanArgs) -> Result<()> {
    let settings = load_settings(
        config_path.as_deref(),
        args.settings.overrides(),
        Requirements::MANIFEST,
    )?;

    let mods = ModsDir::open_or_empty(&settings.mods_path)?;

    let cache = fetch_cache(&settings);
    let catalog = WorkshopCatalog::new(&cache);
    let manifests = ManifestLoader::new(settings.manifest_location()?.clone(), &cache);

    let pending = plan(&catalog, &manifests, mods.catalog())?;

    print_plan(&pending);
    log_cache_stats(&cache);
    Ok(())
}
