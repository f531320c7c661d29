//! State file errors

use std::fmt::Display;
use std::path::Path;

use super::ModsyncError;

/// Creates a state read error
pub fn read_failed(path: &Path, reason: impl Display) -> ModsyncError {
    ModsyncError::StateReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a state parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Display) -> ModsyncError {
    ModsyncError::StateParseFailed {
        path: path.into(),
        reason: reason.to_string(),
    }
}

/// Creates a state write error
pub fn write_failed(path: &Path, reason: impl Display) -> ModsyncError {
    ModsyncError::StateWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
