//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Provides temp directories plus in-memory stand-ins for the remote catalog,
//! the manifest source and the installer, so the resolver and the sync
//! orchestrator can be tested without network access or steamcmd.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeCatalog, FakeInstaller, create_temp_dir};
//!
//! let catalog = FakeCatalog::new()
//!     .with_item("1", "Mod One", "1 Jan", &["3"])
//!     .with_item("3", "Mod Three", "2 Jan", &[]);
//! let installer = FakeInstaller::new().failing("3");
//! ```

#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use tempfile::TempDir;

use crate::config::manifest::{Manifest, ManifestSource};
use crate::domain::{ItemDetail, ItemId};
use crate::error::{Result, fetch, install};
use crate::installer::Installer;
use crate::resolver::CatalogSource;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Shorthand for building an item id
pub fn id(raw: &str) -> ItemId {
    ItemId::new(raw)
}

/// Shorthand for building a set of item ids
pub fn ids(raw: &[&str]) -> BTreeSet<ItemId> {
    raw.iter().map(|r| ItemId::new(*r)).collect()
}

/// Parse a manifest from JSON, panicking on malformed fixtures
pub fn manifest(json: &str) -> Manifest {
    Manifest::from_json(json, "fixture").expect("fixture manifest should parse")
}

/// In-memory catalog: item id -> (detail, direct dependencies)
#[derive(Default)]
pub struct FakeCatalog {
    items: HashMap<ItemId, (ItemDetail, Vec<ItemId>)>,
    broken: BTreeSet<ItemId>,
    dependency_lookups: RefCell<Vec<ItemId>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item with its title, update marker and direct dependencies
    pub fn with_item(mut self, raw_id: &str, title: &str, updated: &str, deps: &[&str]) -> Self {
        self.items.insert(
            id(raw_id),
            (
                ItemDetail::new(title, updated),
                deps.iter().map(|d| id(d)).collect(),
            ),
        );
        self
    }

    /// Make every lookup of `raw_id` fail
    pub fn with_broken(mut self, raw_id: &str) -> Self {
        self.broken.insert(id(raw_id));
        self
    }

    /// Change the update marker of an existing item
    pub fn bump(&mut self, raw_id: &str, updated: &str) {
        if let Some((detail, _)) = self.items.get_mut(&id(raw_id)) {
            detail.updated_marker = updated.to_string();
        }
    }

    /// Detail of an item as the catalog currently reports it
    pub fn detail(&self, raw_id: &str) -> ItemDetail {
        self.items
            .get(&id(raw_id))
            .map(|(detail, _)| detail.clone())
            .expect("fixture item should exist")
    }

    /// How many times dependencies of `raw_id` were looked up
    pub fn dependency_lookups_of(&self, raw_id: &str) -> usize {
        let wanted = id(raw_id);
        self.dependency_lookups
            .borrow()
            .iter()
            .filter(|i| **i == wanted)
            .count()
    }

    pub fn total_dependency_lookups(&self) -> usize {
        self.dependency_lookups.borrow().len()
    }

    fn lookup(&self, item: &ItemId) -> Result<&(ItemDetail, Vec<ItemId>)> {
        if self.broken.contains(item) {
            return Err(fetch::request_failed(
                format!("fake://{item}"),
                "remote unavailable",
            ));
        }
        self.items
            .get(item)
            .ok_or_else(|| fetch::page_parse_failed(item.as_str(), "missing item title"))
    }
}

impl CatalogSource for FakeCatalog {
    fn fetch_detail(&self, item: &ItemId) -> Result<ItemDetail> {
        self.lookup(item).map(|(detail, _)| detail.clone())
    }

    fn fetch_dependencies(&self, item: &ItemId) -> Result<Vec<ItemId>> {
        self.dependency_lookups.borrow_mut().push(item.clone());
        self.lookup(item).map(|(_, deps)| deps.clone())
    }
}

/// Manifest source that always returns the same manifest
pub struct StaticManifest {
    manifest: RefCell<Manifest>,
    loads: RefCell<usize>,
}

impl StaticManifest {
    pub fn new(json: &str) -> Self {
        Self {
            manifest: RefCell::new(manifest(json)),
            loads: RefCell::new(0),
        }
    }

    /// Replace the manifest served from now on
    pub fn set(&self, json: &str) {
        *self.manifest.borrow_mut() = manifest(json);
    }

    pub fn loads(&self) -> usize {
        *self.loads.borrow()
    }
}

impl ManifestSource for StaticManifest {
    fn load_manifest(&self) -> Result<Manifest> {
        *self.loads.borrow_mut() += 1;
        Ok(self.manifest.borrow().clone())
    }
}

/// Installer that records calls and fails for selected items
#[derive(Default)]
pub struct FakeInstaller {
    failing: BTreeSet<ItemId>,
    installed: RefCell<Vec<ItemId>>,
}

impl FakeInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make installs of `raw_id` fail
    pub fn failing(mut self, raw_id: &str) -> Self {
        self.failing.insert(id(raw_id));
        self
    }

    /// Ids passed to `install`, in call order
    pub fn attempted(&self) -> Vec<ItemId> {
        self.installed.borrow().clone()
    }
}

impl Installer for FakeInstaller {
    fn install(&self, item: &ItemId, _detail: &ItemDetail) -> Result<()> {
        self.installed.borrow_mut().push(item.clone());
        if self.failing.contains(item) {
            return Err(install::failed(
                item.as_str(),
                "download failed after 3 attempt(s)",
            ));
        }
        Ok(())
    }
}

/// Detail map keyed by id, for diff tests
pub fn details(entries: &[(&str, &str, &str)]) -> BTreeMap<ItemId, ItemDetail> {
    entries
        .iter()
        .map(|(raw_id, title, updated)| (id(raw_id), ItemDetail::new(*title, *updated)))
        .collect()
}
