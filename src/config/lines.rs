//! Grouping index (modlines.json) data structures

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, state};

/// Grouping index filename
pub const LINES_FILE: &str = "modlines.json";

/// Line name to the installed directory names it needs
///
/// Member lists are kept sorted and deduplicated so that two runs over the
/// same inputs serialize to identical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupingIndex {
    lines: BTreeMap<String, Vec<String>>,
}

impl GroupingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the index from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let mut index: Self =
            serde_json::from_str(json).map_err(|e| state::parse_failed(LINES_FILE, e))?;
        for members in index.lines.values_mut() {
            members.sort();
            members.dedup();
        }
        Ok(index)
    }

    /// Serialize the index to JSON (pretty-printed)
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| state::parse_failed(LINES_FILE, e))?;
        json.push('\n');
        Ok(json)
    }

    /// Set the directories of a line
    pub fn insert(&mut self, line: impl Into<String>, directories: impl IntoIterator<Item = String>) {
        let mut members: Vec<String> = directories.into_iter().collect();
        members.sort();
        members.dedup();
        self.lines.insert(line.into(), members);
    }

    #[cfg(test)]
    pub fn get(&self, line: &str) -> Option<&[String]> {
        self.lines.get(line).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains_key(line)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.lines.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
