//! Mods directory management for modsync
//!
//! This module handles:
//! - Loading and saving the two state files
//! - Locking the mods directory against concurrent runs
//!
//! ## Mods Directory Structure
//!
//! ```text
//! mods/
//! ├── mods_details.json   # Catalog snapshot: item id -> detail
//! ├── modlines.json       # Grouping index: line -> directory names
//! ├── .modsync.lock       # Advisory lock file (only during a run)
//! ├── @cba_a3/            # Installed items
//! └── @ace/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use fslock::LockFile;

use crate::common::fs::{has_contents, persist_staged, stage_file, write_atomic};
use crate::config::catalog::CATALOG_FILE;
use crate::config::lines::LINES_FILE;
use crate::config::{CatalogSnapshot, GroupingIndex};
use crate::domain::{ItemDetail, ItemId};
use crate::error::{ModsyncError, Result, state};

/// Lock file for mods directory locking
pub const LOCK_FILE: &str = ".modsync.lock";

/// Both persisted state files, loaded together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    pub catalog: CatalogSnapshot,
    pub lines: GroupingIndex,
}

/// Which state files a commit actually rewrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOutcome {
    pub catalog_written: bool,
    pub lines_written: bool,
}

/// The mods directory and its state
#[derive(Debug)]
pub struct ModsDir {
    /// Directory the items are installed into
    pub root: PathBuf,

    /// State loaded at open time and updated during the run
    pub state: SyncState,

    /// Held for as long as this value lives when opened for writing;
    /// only its Drop matters
    #[allow(dead_code)]
    guard: Option<ModsDirGuard>,
}

/// RAII guard for mods directory locking
///
/// Acquires an advisory file lock on creation and releases it on drop.
/// This prevents two runs from updating the same snapshot concurrently.
#[derive(Debug)]
pub struct ModsDirGuard {
    lock: LockFile,
    lock_path: PathBuf,
}

impl ModsDir {
    /// Open an existing mods directory read-only, without locking
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(ModsyncError::ModsDirNotFound {
                path: root.display().to_string(),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            state: Self::load_state(root)?,
            guard: None,
        })
    }

    /// Open for inspection; a missing directory reads as empty state
    pub fn open_or_empty(root: &Path) -> Result<Self> {
        if root.is_dir() {
            return Self::open(root);
        }
        Ok(Self {
            root: root.to_path_buf(),
            state: SyncState::default(),
            guard: None,
        })
    }

    /// Open the mods directory for a run, creating it if needed and taking
    /// the lock
    pub fn open_or_init(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            tracing::info!(path = %root.display(), "creating mods directory");
            fs::create_dir_all(root).map_err(|e| state::write_failed(root, e))?;
        }

        let guard =
            ModsDirGuard::try_acquire(root)?.ok_or_else(|| ModsyncError::ModsDirLocked {
                path: root.display().to_string(),
            })?;

        Ok(Self {
            root: root.to_path_buf(),
            state: Self::load_state(root)?,
            guard: Some(guard),
        })
    }

    fn load_state(root: &Path) -> Result<SyncState> {
        let catalog = match Self::read_optional(&root.join(CATALOG_FILE))? {
            Some(json) => CatalogSnapshot::from_json(&json)?,
            None => CatalogSnapshot::new(),
        };
        let lines = match Self::read_optional(&root.join(LINES_FILE))? {
            Some(json) => GroupingIndex::from_json(&json)?,
            None => GroupingIndex::new(),
        };
        tracing::debug!(
            items = catalog.len(),
            lines = lines.len(),
            "loaded state from {}",
            root.display()
        );
        Ok(SyncState { catalog, lines })
    }

    fn read_optional(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(state::read_failed(path, e)),
        }
    }

    /// Path of the catalog snapshot file
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    /// Path of the grouping index file
    pub fn lines_path(&self) -> PathBuf {
        self.root.join(LINES_FILE)
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.state.catalog
    }

    pub fn lines(&self) -> &GroupingIndex {
        &self.state.lines
    }

    /// Whether this directory was opened with the lock held
    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.guard.is_some()
    }

    /// Record a freshly installed item and persist the snapshot right away
    pub fn record_installed(&mut self, id: ItemId, detail: ItemDetail) -> Result<()> {
        self.state.catalog.insert(id, detail);
        self.save_catalog()
    }

    /// Persist the catalog snapshot (write-temp-then-rename)
    pub fn save_catalog(&self) -> Result<()> {
        let path = self.catalog_path();
        let json = self.state.catalog.to_json()?;
        if has_contents(&path, json.as_bytes()) {
            return Ok(());
        }
        write_atomic(&path, json.as_bytes())
    }

    /// Write both state files at the end of a run
    ///
    /// Both files are staged as temp files in the mods directory before
    /// either is renamed into place. Files whose content is unchanged are
    /// left untouched.
    pub fn commit(&mut self, lines: GroupingIndex) -> Result<CommitOutcome> {
        let catalog_path = self.catalog_path();
        let lines_path = self.lines_path();
        let catalog_json = self.state.catalog.to_json()?;
        let lines_json = lines.to_json()?;

        let staged_catalog = if has_contents(&catalog_path, catalog_json.as_bytes()) {
            None
        } else {
            Some(stage_file(&catalog_path, catalog_json.as_bytes())?)
        };
        let staged_lines = if has_contents(&lines_path, lines_json.as_bytes()) {
            None
        } else {
            Some(stage_file(&lines_path, lines_json.as_bytes())?)
        };

        let outcome = CommitOutcome {
            catalog_written: staged_catalog.is_some(),
            lines_written: staged_lines.is_some(),
        };
        if let Some(staged) = staged_catalog {
            persist_staged(staged, &catalog_path)?;
        }
        if let Some(staged) = staged_lines {
            persist_staged(staged, &lines_path)?;
        }

        self.state.lines = lines;
        Ok(outcome)
    }
}

impl ModsDirGuard {
    /// Try to acquire the lock without blocking
    ///
    /// Returns `None` when another process holds it.
    pub fn try_acquire(root: &Path) -> Result<Option<Self>> {
        let lock_path = root.join(LOCK_FILE);

        if !root.is_dir() {
            return Err(ModsyncError::ModsDirNotFound {
                path: root.display().to_string(),
            });
        }

        let mut lock = LockFile::open(&lock_path).map_err(|e| ModsyncError::LockFailed {
            reason: format!("Failed to open lock file: {e}"),
        })?;

        let acquired = lock.try_lock().map_err(|e| ModsyncError::LockFailed {
            reason: format!("Failed to try lock: {e}"),
        })?;

        if acquired {
            Ok(Some(Self { lock, lock_path }))
        } else {
            Ok(None)
        }
    }
}

impl Drop for ModsDirGuard {
    fn drop(&mut self) {
        // Release the lock
        let _ = self.lock.unlock();

        // Remove the lock file - it will be recreated when needed
        let _ = fs::remove_file(&self.lock_path);
    }
}
