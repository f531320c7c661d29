//! Common file system operations with unified error handling

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, state};

/// Copy a directory recursively
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let dst_path = dst_ref.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Move a directory, falling back to copy-and-delete across file systems
pub fn move_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    copy_dir_recursive(src, dst)?;
    fs::remove_dir_all(src)
}

/// Remove a directory tree if it exists
pub fn remove_dir_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Write `contents` to a temporary file next to `path`
///
/// The returned file is removed on drop unless it is persisted with
/// [`persist_staged`].
pub fn stage_file(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| state::write_failed(path, e))?;
    staged
        .write_all(contents)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| state::write_failed(path, e))?;
    Ok(staged)
}

/// Atomically move a staged file into place
pub fn persist_staged(staged: NamedTempFile, path: &Path) -> Result<()> {
    staged
        .persist(path)
        .map(|_| ())
        .map_err(|e| state::write_failed(path, e.error))
}

/// Whether `path` already holds exactly `contents`
pub fn has_contents(path: &Path, contents: &[u8]) -> bool {
    fs::read(path).is_ok_and(|existing| existing == contents)
}

/// Write a file via write-temp-then-rename
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let staged = stage_file(path, contents)?;
    persist_staged(staged, path)
}
