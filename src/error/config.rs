//! Configuration errors

use std::path::Path;

use super::ModsyncError;

/// Creates a config not found error
pub fn not_found(path: &Path) -> ModsyncError {
    ModsyncError::ConfigNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a config parse error
pub fn parse_failed(path: &Path, reason: impl Into<String>) -> ModsyncError {
    ModsyncError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> ModsyncError {
    ModsyncError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a missing setting error
pub fn missing(name: impl Into<String>) -> ModsyncError {
    ModsyncError::MissingSetting { name: name.into() }
}
