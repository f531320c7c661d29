//! Diff of a target closure against the installed snapshot

use std::collections::{BTreeMap, BTreeSet};

use crate::config::CatalogSnapshot;
use crate::domain::{ItemDetail, ItemId};

/// Items that must be (re)installed to match `target`
///
/// An item is selected when it is not installed, or when its update marker
/// differs from the installed one. Installed items missing from `target`
/// are never selected.
pub fn mods_to_sync(
    target: &BTreeMap<ItemId, ItemDetail>,
    current: &CatalogSnapshot,
) -> BTreeSet<ItemId> {
    target
        .iter()
        .filter(|(id, detail)| {
            current
                .get(id)
                .is_none_or(|installed| installed.updated_marker != detail.updated_marker)
        })
        .map(|(id, _)| id.clone())
        .collect()
}

/// Installed items no longer reachable from the manifest
pub fn stale_entries(target: &BTreeSet<ItemId>, current: &CatalogSnapshot) -> Vec<ItemId> {
    current
        .iter()
        .map(|(id, _)| id)
        .filter(|id| !target.contains(*id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{details, id, ids};

    fn snapshot(entries: &[(&str, &str, &str)]) -> CatalogSnapshot {
        let mut snapshot = CatalogSnapshot::new();
        for (raw_id, detail) in details(entries) {
            snapshot.insert(raw_id, detail);
        }
        snapshot
    }

    #[test]
    fn test_equal_markers_need_nothing() {
        let target = details(&[("1", "One", "a"), ("2", "Two", "b")]);
        let current = snapshot(&[("1", "One", "a"), ("2", "Two", "b")]);
        assert!(mods_to_sync(&target, &current).is_empty());
    }

    #[test]
    fn test_empty_snapshot_needs_everything() {
        let target = details(&[("1", "One", "a"), ("2", "Two", "b")]);
        assert_eq!(
            mods_to_sync(&target, &CatalogSnapshot::new()),
            ids(&["1", "2"])
        );
    }

    #[test]
    fn test_changed_marker_is_selected() {
        let target = details(&[("1", "One", "a"), ("2", "Two", "new")]);
        let current = snapshot(&[("1", "One", "a"), ("2", "Two", "old")]);
        assert_eq!(mods_to_sync(&target, &current), ids(&["2"]));
    }

    #[test]
    fn test_marker_is_compared_for_equality_only() {
        let target = details(&[("1", "One", "1 Jan")]);
        let current = snapshot(&[("1", "One", "31 Dec")]);
        assert_eq!(mods_to_sync(&target, &current), ids(&["1"]));
    }

    #[test]
    fn test_extra_installed_items_are_kept_and_reported() {
        let target = details(&[("1", "One", "a")]);
        let current = snapshot(&[("1", "One", "a"), ("9", "Retired", "z")]);
        assert!(mods_to_sync(&target, &current).is_empty());
        assert_eq!(stale_entries(&ids(&["1"]), &current), vec![id("9")]);
    }
}
