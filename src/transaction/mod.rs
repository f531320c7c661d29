//! Transaction support for installing one item
//!
//! Placing an item touches the mods directory and the keys directory. The
//! transaction records every change so a failure half way leaves both
//! directories as they were.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! transaction.move_aside(&old_install)?;
//! transaction.track_dir_created(&new_install);
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::remove_dir_if_exists;
use crate::error::{Result, install};

/// Suffix of directories moved out of the way during an install
const ASIDE_SUFFIX: &str = ".modsync-old";

/// Original content of a file replaced during the transaction
#[derive(Debug, Clone)]
struct FileBackup {
    path: PathBuf,
    content: Vec<u8>,
}

/// A directory renamed out of the way, restored on rollback
#[derive(Debug, Clone)]
struct MovedAside {
    original: PathBuf,
    aside: PathBuf,
}

/// A transaction for one item install
#[derive(Debug, Default)]
pub struct Transaction {
    /// Files created during this transaction
    created_files: HashSet<PathBuf>,

    /// Directories created during this transaction (removed recursively)
    created_dirs: HashSet<PathBuf>,

    /// Files overwritten during this transaction
    replaced_files: Vec<FileBackup>,

    /// Directories renamed out of the way
    moved_aside: Vec<MovedAside>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a file that was created during this transaction
    pub fn track_file_created(&mut self, path: impl Into<PathBuf>) {
        self.created_files.insert(path.into());
    }

    /// Track a directory that was created during this transaction
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.insert(path.into());
    }

    /// Whether `path` was created by this transaction
    pub fn tracks_created(&self, path: &Path) -> bool {
        self.created_files.contains(path)
    }

    /// Back up a file that is about to be overwritten
    pub fn backup_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read(path).map_err(|e| {
            install::failed(
                path.display().to_string(),
                format!("failed to back up file: {e}"),
            )
        })?;
        self.replaced_files.push(FileBackup {
            path: path.to_path_buf(),
            content,
        });
        Ok(())
    }

    /// Rename an existing directory out of the way
    ///
    /// It is deleted on commit and renamed back on rollback.
    pub fn move_aside(&mut self, path: &Path) -> Result<()> {
        let mut name = path.file_name().map(OsString::from).unwrap_or_default();
        name.push(ASIDE_SUFFIX);
        let aside = path.with_file_name(name);

        remove_dir_if_exists(&aside)
            .and_then(|()| fs::rename(path, &aside))
            .map_err(|e| {
                install::failed(
                    path.display().to_string(),
                    format!("failed to move previous install aside: {e}"),
                )
            })?;

        self.moved_aside.push(MovedAside {
            original: path.to_path_buf(),
            aside,
        });
        Ok(())
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        for moved in &self.moved_aside {
            if let Err(e) = remove_dir_if_exists(&moved.aside) {
                tracing::warn!(path = %moved.aside.display(), error = %e, "failed to remove previous install");
            }
        }
        self.committed = true;
    }

    /// Manually trigger a rollback
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        for path in &self.created_files {
            if path.exists() {
                let _ = fs::remove_file(path);
            }
        }

        for path in &self.created_dirs {
            if let Err(e) = remove_dir_if_exists(path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove directory");
            }
        }

        for backup in &self.replaced_files {
            if let Err(e) = fs::write(&backup.path, &backup.content) {
                tracing::warn!(path = %backup.path.display(), error = %e, "failed to restore file");
            }
        }

        for moved in self.moved_aside.iter().rev() {
            if let Err(e) = fs::rename(&moved.aside, &moved.original) {
                tracing::warn!(path = %moved.original.display(), error = %e, "failed to restore previous install");
            }
        }

        self.committed = true;
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            tracing::debug!("rolling back uncommitted install");
            self.rollback();
        }
    }
}
