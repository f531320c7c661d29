//! Outcome of a sync run

use crate::domain::{ItemDetail, ItemId};
use crate::error::ModsyncError;
use crate::operations::lines::{LinesBuild, OmittedLine};
use crate::operations::sync::orchestrator::SyncPlan;
use crate::workspace::CommitOutcome;

/// An item that was installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedItem {
    pub id: ItemId,
    pub title: String,
}

/// An item whose install failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub id: ItemId,
    pub title: String,
    pub reason: String,
}

/// Everything a sync run did
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Size of the resolved dependency closure
    pub closure_size: usize,
    /// Closure items that were already installed at the current marker
    pub up_to_date: usize,
    pub installed: Vec<SyncedItem>,
    pub failed: Vec<FailedItem>,
    /// Lines written to the index
    pub written_lines: Vec<String>,
    /// Lines left out because some of their items are not installed
    pub omitted_lines: Vec<OmittedLine>,
    /// Installed items no longer reachable from the manifest (kept on disk)
    pub stale: Vec<ItemId>,
    /// Which state files the final commit rewrote
    pub commit: CommitOutcome,
}

impl SyncReport {
    pub fn from_plan(plan: &SyncPlan) -> Self {
        Self {
            closure_size: plan.target.len(),
            up_to_date: plan.up_to_date(),
            stale: plan.stale.clone(),
            ..Self::default()
        }
    }

    pub fn record_installed(&mut self, id: &ItemId, detail: &ItemDetail) {
        self.installed.push(SyncedItem {
            id: id.clone(),
            title: detail.title.clone(),
        });
    }

    pub fn record_failed(&mut self, id: &ItemId, detail: &ItemDetail, error: &ModsyncError) {
        self.failed.push(FailedItem {
            id: id.clone(),
            title: detail.title.clone(),
            reason: error.to_string(),
        });
    }

    pub fn record_lines(&mut self, build: &LinesBuild) {
        self.written_lines = build.index.iter().map(|(name, _)| name.to_string()).collect();
        self.omitted_lines.clone_from(&build.omitted);
    }

    /// Whether every item installed and every line was written
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.omitted_lines.is_empty()
    }
}
