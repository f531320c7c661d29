//! Safe temporary directory base so steamcmd downloads and test directories are never
//! created under the current working directory (e.g. when TMPDIR=tmp or TMPDIR=./tmp).

use std::env;
use std::path::PathBuf;

/// Directory name for the default steamcmd download area
pub const DOWNLOAD_DIR_NAME: &str = "modsync-steamcmd";

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Default location steamcmd downloads workshop items into
pub fn default_download_dir() -> PathBuf {
    temp_dir_base().join(DOWNLOAD_DIR_NAME)
}
