//! Error types and handling for modsync
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostic codes.
//!
//! Constructors are grouped by error domain:
//! - [`fetch`]: remote lookups, page parsing and dependency resolution
//! - [`install`]: per-item install failures
//! - [`state`]: persisted state files in the mods directory
//! - [`config`]: settings and CLI configuration

pub mod config;
pub mod fetch;
pub mod install;
pub mod state;

use miette::Diagnostic;
use thiserror::Error;

/// How an error affects a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A remote lookup failed while computing a closure; fatal
    Resolution,
    /// One item could not be installed; the run continues
    Install,
    /// State files could not be read or written; fatal
    StateIo,
    /// Settings are missing or malformed; fatal
    Config,
    /// Anything else coming from the operating system; fatal
    Io,
}

/// Main error type for modsync operations
#[derive(Error, Diagnostic, Debug)]
pub enum ModsyncError {
    // Fetch errors
    #[error("Request to {url} failed: {reason}")]
    #[diagnostic(
        code(modsync::fetch::request_failed),
        help("Check your network connection and that the URL is reachable")
    )]
    RequestFailed { url: String, reason: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    #[diagnostic(code(modsync::fetch::bad_status))]
    BadStatus { url: String, status: u16 },

    #[error("Failed to parse workshop page of item {item}: {reason}")]
    #[diagnostic(
        code(modsync::fetch::page_parse_failed),
        help("The item may be private or removed from the workshop")
    )]
    PageParseFailed { item: String, reason: String },

    #[error("Failed to parse manifest at {location}: {reason}")]
    #[diagnostic(
        code(modsync::fetch::manifest_parse_failed),
        help("The manifest must be a JSON object of line name to {{alias: item id}}")
    )]
    ManifestParseFailed { location: String, reason: String },

    #[error("Failed to resolve item {item}: {reason}")]
    #[diagnostic(
        code(modsync::fetch::resolution_failed),
        help("No state was changed; run the sync again once the item page is reachable")
    )]
    ResolutionFailed { item: String, reason: String },

    // Install errors
    #[error("Item {item} failed to install: {reason}")]
    #[diagnostic(code(modsync::install::failed))]
    InstallFailed { item: String, reason: String },

    // State errors
    #[error("Failed to read state file {path}: {reason}")]
    #[diagnostic(code(modsync::state::read_failed))]
    StateReadFailed { path: String, reason: String },

    #[error("State file {path} is corrupt: {reason}")]
    #[diagnostic(
        code(modsync::state::parse_failed),
        help("Remove the file to force a full resync of the mods directory")
    )]
    StateParseFailed { path: String, reason: String },

    #[error("Failed to write state file {path}: {reason}")]
    #[diagnostic(code(modsync::state::write_failed))]
    StateWriteFailed { path: String, reason: String },

    #[error("Mods directory not found: {path}")]
    #[diagnostic(
        code(modsync::state::mods_dir_not_found),
        help("Run 'modsync sync' to create and populate the mods directory")
    )]
    ModsDirNotFound { path: String },

    #[error("Mods directory {path} is locked by another modsync process")]
    #[diagnostic(
        code(modsync::state::locked),
        help("Wait for the other process to finish or remove the .modsync.lock file manually")
    )]
    ModsDirLocked { path: String },

    #[error("Failed to lock mods directory: {reason}")]
    #[diagnostic(code(modsync::state::lock_failed))]
    LockFailed { reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(modsync::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(modsync::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(modsync::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Missing required setting: {name}")]
    #[diagnostic(
        code(modsync::config::missing_setting),
        help("Pass it as a flag, set the MODSYNC_* environment variable, or add it to the config file")
    )]
    MissingSetting { name: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(modsync::fs::io_error))]
    IoError { message: String },
}

impl ModsyncError {
    /// Classify this error for the sync run's recovery policy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RequestFailed { .. }
            | Self::BadStatus { .. }
            | Self::PageParseFailed { .. }
            | Self::ManifestParseFailed { .. }
            | Self::ResolutionFailed { .. } => ErrorCategory::Resolution,
            Self::InstallFailed { .. } => ErrorCategory::Install,
            Self::StateReadFailed { .. }
            | Self::StateParseFailed { .. }
            | Self::StateWriteFailed { .. }
            | Self::ModsDirNotFound { .. }
            | Self::ModsDirLocked { .. }
            | Self::LockFailed { .. } => ErrorCategory::StateIo,
            Self::ConfigNotFound { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. }
            | Self::MissingSetting { .. } => ErrorCategory::Config,
            Self::IoError { .. } => ErrorCategory::Io,
        }
    }
}

impl From<std::io::Error> for ModsyncError {
    fn from(err: std::io::Error) -> Self {
        ModsyncError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ModsyncError {
    fn from(err: serde_yaml::Error) -> Self {
        ModsyncError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ModsyncError {
    fn from(err: serde_json::Error) -> Self {
        ModsyncError::StateParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for ModsyncError {
    fn from(err: inquire::InquireError) -> Self {
        ModsyncError::ConfigInvalid {
            message: format!("prompt aborted: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ModsyncError>;
