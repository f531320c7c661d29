//! Building the lines index
//!
//! A line is listed only when every item of its dependency closure is
//! installed. Otherwise it is left out entirely, so a game server started
//! from the index never misses a dependency.

use std::collections::BTreeMap;

use crate::config::{CatalogSnapshot, GroupingIndex, Manifest};
use crate::domain::ItemId;
use crate::error::Result;
use crate::resolver::Resolver;

/// A line left out of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedLine {
    pub name: String,
    /// Closure items absent from the snapshot
    pub missing: Vec<ItemId>,
}

/// Result of building the index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinesBuild {
    pub index: GroupingIndex,
    pub omitted: Vec<OmittedLine>,
}

/// Resolve each line of `manifest` and list the directories of its items
///
/// A resolution failure is fatal. Lines with uninstalled items are omitted
/// and reported in [`LinesBuild::omitted`].
pub fn build_index(
    manifest: &Manifest,
    catalog: &CatalogSnapshot,
    resolver: &Resolver<'_>,
) -> Result<LinesBuild> {
    let mut build = LinesBuild::default();

    for (name, seeds) in manifest.lines() {
        let closure = resolver.resolve_closure(&seeds)?;

        let missing: Vec<ItemId> = closure
            .iter()
            .filter(|id| !catalog.contains(id))
            .cloned()
            .collect();
        if !missing.is_empty() {
            tracing::warn!(
                line = name,
                missing = ?missing.iter().map(ItemId::as_str).collect::<Vec<_>>(),
                "not all items of the line are installed, omitting it"
            );
            build.omitted.push(OmittedLine {
                name: name.to_string(),
                missing,
            });
            continue;
        }

        let mut owners: BTreeMap<&str, &ItemId> = BTreeMap::new();
        for id in &closure {
            let Some(detail) = catalog.get(id) else {
                continue;
            };
            if let Some(other) = owners.insert(detail.directory_name.as_str(), id) {
                tracing::warn!(
                    line = name,
                    directory = %detail.directory_name,
                    first = %other,
                    second = %id,
                    "two items share one directory name"
                );
            }
        }

        tracing::debug!(line = name, items = closure.len(), "line resolved");
        build
            .index
            .insert(name, owners.keys().map(|dir| (*dir).to_string()));
    }

    Ok(build)
}
