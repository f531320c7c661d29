//! Install errors

use super::ModsyncError;

/// Creates an install failed error
pub fn failed(item: impl Into<String>, reason: impl Into<String>) -> ModsyncError {
    ModsyncError::InstallFailed {
        item: item.into(),
        reason: reason.into(),
    }
}
