//! Configuration and state file handling for modsync
//!
//! This module contains data structures for:
//! - `mods_details.json` - Catalog snapshot of installed items
//! - `modlines.json` - Grouping index of installed directories per line
//! - the remote manifest of lines to item ids
//! - `config.yaml` - User settings

pub mod catalog;
pub mod lines;
pub mod manifest;
pub mod settings;

// Re-export commonly used types
pub use catalog::CatalogSnapshot;
pub use lines::GroupingIndex;
pub use manifest::{Manifest, ManifestLoader, ManifestSource};
pub use settings::{Requirements, Settings, SettingsFile};
