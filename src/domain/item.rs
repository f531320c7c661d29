//! Catalog item identity and metadata

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::string_utils::directory_name_for_title;

/// Opaque identity of a catalog item, stable across syncs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Metadata of one item as reported by the catalog
///
/// `updated_marker` is compared for equality only. Serialized as `updated`
/// to keep the `mods_details.json` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub title: String,
    #[serde(rename = "updated")]
    pub updated_marker: String,
    pub directory_name: String,
}

impl ItemDetail {
    /// Build a detail, deriving the install directory name from the title
    pub fn new(title: impl Into<String>, updated_marker: impl Into<String>) -> Self {
        let title = title.into();
        let directory_name = directory_name_for_title(&title);
        Self {
            title,
            updated_marker: updated_marker.into(),
            directory_name,
        }
    }
}
