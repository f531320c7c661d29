//! Status command implementation
//!
//! Offline view of the mods directory: installed items and recorded lines.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;

use crate::cli::StatusArgs;
use crate::commands::helpers::load_settings;
use crate::config::{CatalogSnapshot, GroupingIndex, Requirements};
use crate::error::Result;
use crate::workspace::ModsDir;

#[derive(Serialize)]
struct StatusJson<'a> {
    mods_path: String,
    items: &'a CatalogSnapshot,
    lines: &'a GroupingIndex,
}

/// Run status command
pub fn run(config_path: Option<PathBuf>, args: StatusArgs) -> Result<()> {
    let settings = load_settings(
        config_path.as_deref(),
        args.settings.overrides(),
        Requirements::MODS_DIR,
    )?;
    let mods = ModsDir::open(&settings.mods_path)?;

    if args.json {
        let json = serde_json::to_string_pretty(&StatusJson {
            mods_path: mods.root.display().to_string(),
            items: mods.catalog(),
            lines: mods.lines(),
        })?;
        println!("{json}");
        return Ok(());
    }

    print_status(&mods);
    Ok(())
}

fn print_status(mods: &ModsDir) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Mods directory:"),
        mods.root.display()
    );

    if mods.catalog().is_empty() {
        println!("  {}", Style::new().dim().apply_to("No items installed"));
    } else {
        println!(
            "  {} ({})",
            Style::new().bold().apply_to("Installed items:"),
            mods.catalog().len()
        );
        for (id, detail) in mods.catalog() {
            println!(
                "    {} {} {}",
                Style::new().cyan().apply_to(id),
                Style::new().bold().yellow().apply_to(&detail.directory_name),
                Style::new().dim().apply_to(&detail.updated_marker)
            );
        }
    }

    if mods.lines().is_empty() {
        println!("  {}", Style::new().dim().apply_to("No lines recorded"));
        return;
    }
    println!("  {}", Style::new().bold().apply_to("Lines:"));
    for (name, dirs) in mods.lines().iter() {
        println!("    {} {}", Style::new().green().apply_to(name), dirs.join(";"));
    }
}
