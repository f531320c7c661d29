//! Remote fetch and resolution errors

use super::ModsyncError;

/// Creates a request failed error
pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> ModsyncError {
    ModsyncError::RequestFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a workshop page parse error
pub fn page_parse_failed(item: impl Into<String>, reason: impl Into<String>) -> ModsyncError {
    ModsyncError::PageParseFailed {
        item: item.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest parse error
pub fn manifest_parse_failed(
    location: impl Into<String>,
    reason: impl Into<String>,
) -> ModsyncError {
    ModsyncError::ManifestParseFailed {
        location: location.into(),
        reason: reason.into(),
    }
}

/// Wraps any lookup failure for `item` as a resolution failure
pub fn resolution_failed(item: impl Into<String>, cause: &ModsyncError) -> ModsyncError {
    ModsyncError::ResolutionFailed {
        item: item.into(),
        reason: cause.to_string(),
    }
}
