//! Sync orchestration
//!
//! A run goes through these steps:
//! 1. Load the manifest
//! 2. Collect the items requested by any line
//! 3. Resolve their full dependency closure (any failure aborts the run)
//! 4. Fetch the detail of every item in the closure
//! 5. Diff against the snapshot to find what to install
//! 6. Install each of those items; after each success, record it in the
//!    snapshot and persist it immediately
//! 7. Rebuild the lines index and commit both state files
//!
//! A failed install only affects its own item. The item keeps its previous
//! snapshot entry (or stays absent) and any line needing it is omitted.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{CatalogSnapshot, Manifest, ManifestSource};
use crate::domain::{ItemDetail, ItemId};
use crate::error::Result;
use crate::installer::Installer;
use crate::operations::lines::build_index;
use crate::operations::sync::report::SyncReport;
use crate::progress::ProgressDisplay;
use crate::resolver::diff::{mods_to_sync, stale_entries};
use crate::resolver::{CatalogSource, Resolver};
use crate::workspace::ModsDir;

/// Configuration options for a sync
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Draw a progress bar while installing
    pub show_progress: bool,
}

/// What a sync would do, computed without touching the disk
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub manifest: Manifest,
    /// Detail of every item in the closure
    pub target: BTreeMap<ItemId, ItemDetail>,
    /// Items to (re)install
    pub to_sync: BTreeSet<ItemId>,
    /// Installed items no longer reachable from the manifest
    pub stale: Vec<ItemId>,
}

impl SyncPlan {
    /// Number of closure items already installed at the current marker
    pub fn up_to_date(&self) -> usize {
        self.target.len() - self.to_sync.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_sync.is_empty()
    }
}

/// Load the manifest, resolve its closure and diff it against `snapshot`
pub fn plan(
    catalog: &dyn CatalogSource,
    manifests: &dyn ManifestSource,
    snapshot: &CatalogSnapshot,
) -> Result<SyncPlan> {
    let manifest = manifests.load_manifest()?;
    let seeds = manifest.seeds();
    tracing::info!(lines = manifest.len(), requested = seeds.len(), "manifest loaded");
    if manifest.is_empty() {
        tracing::warn!("manifest defines no lines");
    }

    let resolver = Resolver::new(catalog);
    let closure = resolver.resolve_closure(&seeds)?;
    tracing::info!(items = closure.len(), "dependency closure resolved");

    let target = resolver.fetch_details(&closure)?;
    let to_sync = mods_to_sync(&target, snapshot);
    let stale = stale_entries(&closure, snapshot);
    for id in &stale {
        tracing::debug!(item = %id, "installed item is no longer in the manifest");
    }

    Ok(SyncPlan {
        manifest,
        target,
        to_sync,
        stale,
    })
}

/// High-level sync operation
pub struct SyncOperation<'a> {
    mods: &'a mut ModsDir,
    catalog: &'a dyn CatalogSource,
    manifests: &'a dyn ManifestSource,
    installer: &'a dyn Installer,
    options: SyncOptions,
}

impl<'a> SyncOperation<'a> {
    pub fn new(
        mods: &'a mut ModsDir,
        catalog: &'a dyn CatalogSource,
        manifests: &'a dyn ManifestSource,
        installer: &'a dyn Installer,
        options: SyncOptions,
    ) -> Self {
        Self {
            mods,
            catalog,
            manifests,
            installer,
            options,
        }
    }

    /// Resolve and diff without installing or writing anything
    pub fn plan(&self) -> Result<SyncPlan> {
        plan(self.catalog, self.manifests, self.mods.catalog())
    }

    /// Run the full sync
    pub fn execute(&mut self) -> Result<SyncReport> {
        let plan = self.plan()?;
        let mut report = SyncReport::from_plan(&plan);

        if plan.is_empty() {
            tracing::info!("no items to download or update");
        } else {
            self.install_all(&plan, &mut report)?;
        }

        let resolver = Resolver::new(self.catalog);
        let build = build_index(&plan.manifest, self.mods.catalog(), &resolver)?;
        report.record_lines(&build);

        report.commit = self.mods.commit(build.index)?;
        Ok(report)
    }

    fn install_all(&mut self, plan: &SyncPlan, report: &mut SyncReport) -> Result<()> {
        let total = plan.to_sync.len();
        let progress = ProgressDisplay::new(total as u64, self.options.show_progress);

        for (index, id) in plan.to_sync.iter().enumerate() {
            let Some(detail) = plan.target.get(id) else {
                continue;
            };
            progress.update_item(&detail.title, index + 1, total);

            match self.installer.install(id, detail) {
                Ok(()) => {
                    if let Err(e) = self.mods.record_installed(id.clone(), detail.clone()) {
                        progress.abandon();
                        return Err(e);
                    }
                    tracing::info!(item = %id, title = %detail.title, "installed");
                    report.record_installed(id, detail);
                }
                Err(e) => {
                    tracing::warn!(
                        item = %id,
                        title = %detail.title,
                        error = %e,
                        "install failed, continuing with the remaining items"
                    );
                    report.record_failed(id, detail, &e);
                }
            }
            progress.inc_item();
        }

        progress.finish();
        Ok(())
    }
}
