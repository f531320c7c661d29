//! Dependency resolution over the remote catalog
//!
//! This module handles:
//! - Computing the transitive dependency closure of requested items
//! - Fetching the details of every item in a closure
//! - Diffing a target closure against the installed snapshot ([`diff`])
//!
//! The catalog is an implicit graph whose edges are discovered lazily, one
//! remote lookup per item. Cycles are harmless: each item is expanded at
//! most once.

pub mod diff;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::domain::{ItemDetail, ItemId};
use crate::error::{ModsyncError, Result, fetch};

/// Source of item details and direct dependencies
pub trait CatalogSource {
    /// Title and update marker of an item
    fn fetch_detail(&self, item: &ItemId) -> Result<ItemDetail>;

    /// Direct dependencies of an item, as listed by the catalog
    fn fetch_dependencies(&self, item: &ItemId) -> Result<Vec<ItemId>>;
}

/// Walks the dependency graph of a [`CatalogSource`]
pub struct Resolver<'a> {
    source: &'a dyn CatalogSource,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self { source }
    }

    /// The seeds plus every item they transitively depend on
    ///
    /// Any failed lookup fails the whole computation.
    pub fn resolve_closure(&self, seeds: &BTreeSet<ItemId>) -> Result<BTreeSet<ItemId>> {
        let mut closure = BTreeSet::new();
        self.extend_closure(seeds, &mut closure)?;
        Ok(closure)
    }

    /// Add the closure of `seeds` to `visited`
    ///
    /// Items already in `visited` are treated as expanded and are not looked
    /// up again.
    pub fn extend_closure(
        &self,
        seeds: &BTreeSet<ItemId>,
        visited: &mut BTreeSet<ItemId>,
    ) -> Result<()> {
        let mut queue: VecDeque<ItemId> = seeds
            .iter()
            .filter(|seed| visited.insert((*seed).clone()))
            .cloned()
            .collect();

        while let Some(item) = queue.pop_front() {
            let dependencies = self
                .source
                .fetch_dependencies(&item)
                .map_err(|e| resolution_error(&item, &e))?;
            tracing::debug!(item = %item, count = dependencies.len(), "resolved dependencies");

            for dependency in dependencies {
                if visited.insert(dependency.clone()) {
                    queue.push_back(dependency);
                }
            }
        }

        Ok(())
    }

    /// Fetch the detail of every item in `items`
    pub fn fetch_details(&self, items: &BTreeSet<ItemId>) -> Result<BTreeMap<ItemId, ItemDetail>> {
        items
            .iter()
            .map(|item| {
                self.source
                    .fetch_detail(item)
                    .map(|detail| (item.clone(), detail))
                    .map_err(|e| resolution_error(item, &e))
            })
            .collect()
    }
}

fn resolution_error(item: &ItemId, cause: &ModsyncError) -> ModsyncError {
    match cause {
        ModsyncError::ResolutionFailed { item, reason } => ModsyncError::ResolutionFailed {
            item: item.clone(),
            reason: reason.clone(),
        },
        _ => fetch::resolution_failed(item.as_str(), cause),
    }
}
