//! File operations on a downloaded item
//!
//! Downloads land in `<download>/steamapps/workshop/content/<app>/<id>`.
//! From there an item is renamed to its directory name, every file and
//! directory name is made lowercase and unix safe, server keys are copied
//! out, and the whole tree is moved into the mods directory.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::common::fs::{move_dir, remove_dir_if_exists};
use crate::common::string_utils::safe_name;
use crate::error::Result;
use crate::transaction::Transaction;

/// Directory names that hold server keys, compared case-insensitively
pub const KEY_DIR_NAMES: &[&str] = &[
    "key",
    "keys",
    "serverkey",
    "serverkeys",
    "server_key",
    "server_keys",
];

/// Whether the directory at `path` is likely to hold server keys
pub fn is_key_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| KEY_DIR_NAMES.contains(&name.to_lowercase().as_str()))
}

/// Rename the downloaded `<id>` directory to `dir_name` next to it
///
/// Any leftover directory of that name in the download area is removed
/// first.
pub fn prepare_item_dir(content_dir: &Path, dir_name: &str) -> std::io::Result<PathBuf> {
    let staged = content_dir.with_file_name(dir_name);
    remove_dir_if_exists(&staged)?;
    fs::rename(content_dir, &staged)?;
    Ok(staged)
}

/// Rename every file, then every directory, below `root` to its safe name
///
/// Files go first so no path is invalidated by a renamed parent, and
/// directories are renamed deepest first for the same reason.
pub fn make_names_safe(root: &Path) -> std::io::Result<()> {
    let files: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| !entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect();
    for path in files {
        rename_to_safe(&path)?;
    }

    let dirs: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect();
    for path in dirs {
        rename_to_safe(&path)?;
    }

    Ok(())
}

fn rename_to_safe(path: &Path) -> std::io::Result<()> {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        tracing::warn!(path = %path.display(), "skipping name that is not valid UTF-8");
        return Ok(());
    };
    let safe = safe_name(name);
    if safe == name {
        return Ok(());
    }
    if safe.is_empty() {
        tracing::warn!(path = %path.display(), "no safe name left, keeping original");
        return Ok(());
    }
    fs::rename(path, path.with_file_name(safe))
}

/// Copy every file found in key directories below `root` into `keys_path`
///
/// Returns the number of key files copied.
pub fn copy_keys(root: &Path, keys_path: &Path, transaction: &mut Transaction) -> Result<usize> {
    if !keys_path.is_dir() {
        fs::create_dir_all(keys_path)?;
        transaction.track_dir_created(keys_path);
    }

    let mut copied = 0;
    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir() && is_key_dir(entry.path()))
    {
        for key in fs::read_dir(entry.path())? {
            let key = key?;
            if !key.file_type()?.is_file() {
                continue;
            }
            let target = keys_path.join(key.file_name());
            if !target.is_file() {
                transaction.track_file_created(&target);
            } else if !transaction.tracks_created(&target) {
                transaction.backup_file(&target)?;
            }
            tracing::info!(key = %key.file_name().to_string_lossy(), "copying server key");
            fs::copy(key.path(), &target)?;
            copied += 1;
        }
    }

    if copied == 0 {
        let item = root.file_name().unwrap_or_default().to_string_lossy();
        tracing::warn!(item = %item, "no server key found");
    }
    Ok(copied)
}

/// Normalize a downloaded item and move it into `mods_path`
///
/// A previous install of the same directory is replaced. On any failure
/// the mods and keys directories are left as they were.
pub fn place_item(
    content_dir: &Path,
    dir_name: &str,
    mods_path: &Path,
    keys_path: Option<&Path>,
) -> Result<PathBuf> {
    let staged = prepare_item_dir(content_dir, dir_name)?;
    make_names_safe(&staged)?;

    let mut transaction = Transaction::new();
    if let Some(keys_path) = keys_path {
        copy_keys(&staged, keys_path, &mut transaction)?;
    }

    let destination = mods_path.join(dir_name);
    if destination.exists() {
        transaction.move_aside(&destination)?;
    }
    transaction.track_dir_created(&destination);
    move_dir(&staged, &destination)?;

    transaction.commit();
    Ok(destination)
}
