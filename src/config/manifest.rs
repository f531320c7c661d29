//! Remote manifest of lines
//!
//! The manifest is a JSON object mapping each line name to an object of
//! `alias: item id` pairs:
//!
//! ```json
//! {
//!     "main": {"cba": "450814997", "ace": "463939057"},
//!     "side": {"rhs": "843425103"}
//! }
//! ```
//!
//! Aliases are for humans only. Item ids may be written as strings or numbers.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::cache::FetchCache;
use crate::domain::ItemId;
use crate::error::{Result, fetch};

/// Anything that can produce the manifest for a run
pub trait ManifestSource {
    fn load_manifest(&self) -> Result<Manifest>;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Text(String),
    Number(u64),
}

/// Line name to `alias -> item id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    lines: BTreeMap<String, BTreeMap<String, ItemId>>,
}

impl Manifest {
    /// Parse a manifest; `location` only names the source in errors
    pub fn from_json(json: &str, location: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, RawItemId>> = serde_json::from_str(json)
            .map_err(|e| fetch::manifest_parse_failed(location, e.to_string()))?;

        let mut lines = BTreeMap::new();
        for (line, entries) in raw {
            let mut items = BTreeMap::new();
            for (alias, raw_id) in entries {
                let id = match raw_id {
                    RawItemId::Text(text) => text.trim().to_string(),
                    RawItemId::Number(n) => n.to_string(),
                };
                if id.is_empty() {
                    return Err(fetch::manifest_parse_failed(
                        location,
                        format!("line '{line}' has an empty item id for '{alias}'"),
                    ));
                }
                items.insert(alias, ItemId::new(id));
            }
            lines.insert(line, items);
        }

        Ok(Self { lines })
    }

    /// Every item requested directly by any line
    pub fn seeds(&self) -> BTreeSet<ItemId> {
        self.lines
            .values()
            .flat_map(|items| items.values().cloned())
            .collect()
    }

    /// Each line with the item ids it requests directly
    pub fn lines(&self) -> impl Iterator<Item = (&str, BTreeSet<ItemId>)> {
        self.lines
            .iter()
            .map(|(name, items)| (name.as_str(), items.values().cloned().collect()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Where the manifest is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLocation {
    /// Fetched over HTTP(S)
    Remote(String),
    /// Read from the local file system
    Local(PathBuf),
}

impl ManifestLocation {
    /// URLs starting with `http://` or `https://` are remote, anything else is a path
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(trimmed.to_string())
        } else {
            Self::Local(PathBuf::from(trimmed))
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::Local(path) => path.display().to_string(),
        }
    }
}

/// Loads the manifest through the run's fetch cache
pub struct ManifestLoader<'a> {
    location: ManifestLocation,
    cache: &'a FetchCache,
}

impl<'a> ManifestLoader<'a> {
    pub fn new(location: ManifestLocation, cache: &'a FetchCache) -> Self {
        Self { location, cache }
    }
}

impl ManifestSource for ManifestLoader<'_> {
    fn load_manifest(&self) -> Result<Manifest> {
        let location = self.location.display();
        match &self.location {
            ManifestLocation::Remote(url) => {
                let body = self.cache.get(url)?;
                Manifest::from_json(&body, &location)
            }
            ManifestLocation::Local(path) => {
                let body = fs::read_to_string(path).map_err(|e| {
                    fetch::manifest_parse_failed(&location, format!("cannot read file: {e}"))
                })?;
                Manifest::from_json(&body, &location)
            }
        }
    }
}
