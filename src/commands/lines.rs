//! Lines command implementation
//!
//! Rebuilds modlines.json from the manifest and the installed items without
//! downloading anything.

use std::path::PathBuf;

use console::Style;

use crate::cli::LinesArgs;
use crate::commands::helpers::{fetch_cache, load_settings, log_cache_stats};
use crate::config::{ManifestLoader, ManifestSource, Requirements};
use crate::domain::ItemId;
use crate::error::Result;
use crate::operations::build_index;
use crate::resolver::Resolver;
use crate::workshop::WorkshopCatalog;
use crate::workspace::ModsDir;

/// Run lines command
pub fn run(config_path: Option<PathBuf>, args: LinesArgs) -> Result<()> {
    let settings = load_settings(
        config_path.as_deref(),
        args.settings.overrides(),
        Requirements::MANIFEST,
    )?;

    let mut mods = ModsDir::open_or_init(&settings.mods_path)?;

    let cache = fetch_cache(&settings);
    let catalog = WorkshopCatalog::new(&cache);
    let manifest = ManifestLoader::new(settings.manifest_location()?.clone(), &cache)
        .load_manifest()?;

    let build = build_index(&manifest, mods.catalog(), &Resolver::new(&catalog))?;
    let written: Vec<String> = build.index.iter().map(|(name, _)| name.to_string()).collect();
    let omitted = build.omitted;
    let outcome = mods.commit(build.index)?;

    if outcome.lines_written {
        println!(
            "{} {}",
            Style::new().bold().green().apply_to("Wrote"),
            mods.lines_path().display()
        );
    } else {
        println!("{}", Style::new().dim().apply_to("Lines index unchanged"));
    }
    for name in &written {
        println!("  {}", Style::new().cyan().apply_to(name));
    }
    for line in &omitted {
        let missing: Vec<&str> = line.missing.iter().map(ItemId::as_str).collect();
        println!(
            "  {} {} (missing {})",
            Style::new().yellow().apply_to("Omitted line:"),
            line.name,
            missing.join(", ")
        );
    }

    log_cache_stats(&cache);
    Ok(())
}
