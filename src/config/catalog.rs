//! Catalog snapshot (mods_details.json) data structures
//!
//! The snapshot records, for every installed item, the detail it was
//! installed with. An item whose update marker changes upstream is
//! downloaded again on the next sync.

use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use serde::{Deserialize, Serialize};

use crate::domain::{ItemDetail, ItemId};
use crate::error::{Result, state};

/// Catalog snapshot filename
pub const CATALOG_FILE: &str = "mods_details.json";

/// Persisted record of what is installed and at which update marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogSnapshot {
    items: BTreeMap<ItemId, ItemDetail>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| state::parse_failed(CATALOG_FILE, e))
    }

    /// Serialize the snapshot to JSON (pretty-printed, keys sorted)
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| state::parse_failed(CATALOG_FILE, e))?;
        json.push('\n');
        Ok(json)
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemDetail> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Record `detail` for `id`, replacing any earlier entry
    pub fn insert(&mut self, id: ItemId, detail: ItemDetail) {
        self.items.insert(id, detail);
    }

    pub fn iter(&self) -> Iter<'_, ItemId, ItemDetail> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a CatalogSnapshot {
    type Item = (&'a ItemId, &'a ItemDetail);
    type IntoIter = Iter<'a, ItemId, ItemDetail>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
