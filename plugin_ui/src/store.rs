/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::collections::BTreeMap;

/// Last-known value of every text input that has been edited.
///
/// Keys appear lazily on the first change for an id and are never
/// removed, even if the input disappears from the tree. Writes are
/// merges: setting one id leaves every other entry untouched.
/// Iteration is in key order so snapshots serialize
/// deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputStateStore {
    values: BTreeMap<String, String>,
}

impl InputStateStore {
    /// An empty store, as at session start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `id`. Last write wins.
    pub fn set(&mut self, id: &str, value: &str) {
        match self.values.get_mut(id) {
            Some(existing) => {
                existing.clear();
                existing.push_str(value);
            }
            None => {
                self.values.insert(id.to_string(), value.to_string());
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// Owned copy of the full contents.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = InputStateStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("name"), None);
    }

    #[test]
    fn set_merges_without_touching_other_keys() {
        let mut store = InputStateStore::new();
        store.set("a", "1");
        store.set("name", "Ada");
        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(store.get("name"), Some("Ada"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn last_write_wins() {
        let mut store = InputStateStore::new();
        store.set("q", "h");
        store.set("q", "he");
        store.set("q", "");
        assert_eq!(store.get("q"), Some(""));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut store = InputStateStore::new();
        store.set("b", "2");
        store.set("a", "1");
        let snapshot = store.snapshot();
        store.set("a", "changed");
        assert_eq!(snapshot.get("a").map(String::as_str), Some("1"));
        let keys: Vec<_> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
