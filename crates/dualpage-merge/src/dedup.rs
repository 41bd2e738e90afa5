//! Insertion-ordered deduplication.
//!
//! The first contributor of a key keeps its position and its element; later
//! occurrences are dropped and counted.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::classify::Keyed;

/// Dedup key -> representative element, iterated in insertion order.
#[derive(Clone, Debug)]
pub struct OrderedSet<T> {
    entries: IndexMap<String, T>,
    dropped: usize,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            dropped: 0,
        }
    }
}

impl<T: Keyed> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item` unless its key is already present.
    ///
    /// Returns `true` if the item was inserted.
    pub fn insert(&mut self, item: T) -> bool {
        match self.entries.entry(item.dedup_key().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(item);
                true
            }
            Entry::Occupied(_) => {
                self.dropped += 1;
                false
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rejected duplicates so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Consume the set into its representatives, in insertion order.
    pub fn into_deduplicated(self) -> Deduplicated<T> {
        Deduplicated {
            items: self.entries.into_values().collect(),
            dropped: self.dropped,
        }
    }
}

impl<T: Keyed> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

/// Output of one deduplication pass.
#[derive(Clone, Debug)]
pub struct Deduplicated<T> {
    /// One element per distinct key, in first-seen order.
    pub items: Vec<T>,
    /// How many input elements were duplicates of an earlier key.
    pub dropped: usize,
}

/// Deduplicate `legacy` then `modern`, legacy taking priority.
pub fn dedup_ordered<T: Keyed>(legacy: Vec<T>, modern: Vec<T>) -> Deduplicated<T> {
    let mut set = OrderedSet::new();
    set.extend(legacy);
    set.extend(modern);
    set.into_deduplicated()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        key: String,
        origin: &'static str,
    }

    impl Keyed for Item {
        fn dedup_key(&self) -> &str {
            &self.key
        }

        fn markup(&self) -> String {
            self.key.clone()
        }
    }

    fn items(origin: &'static str, keys: &[&str]) -> Vec<Item> {
        keys.iter()
            .map(|k| Item {
                key: k.to_string(),
                origin,
            })
            .collect()
    }

    fn keys(d: &Deduplicated<Item>) -> Vec<&str> {
        d.items.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn legacy_first_then_new_modern_keys() {
        let out = dedup_ordered(
            items("legacy", &["a", "b", "c"]),
            items("modern", &["b", "d", "a", "e"]),
        );
        assert_eq!(keys(&out), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(out.dropped, 2);
    }

    #[test]
    fn first_occurrence_is_the_representative() {
        let out = dedup_ordered(items("legacy", &["x"]), items("modern", &["x"]));
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].origin, "legacy");
    }

    #[test]
    fn duplicates_within_one_input_collapse() {
        let out = dedup_ordered(items("legacy", &["a", "a", "b", "a"]), Vec::new());
        assert_eq!(keys(&out), vec!["a", "b"]);
        assert_eq!(out.dropped, 2);
    }

    #[test]
    fn empty_inputs() {
        let out = dedup_ordered(Vec::<Item>::new(), Vec::new());
        assert!(out.items.is_empty());
        assert_eq!(out.dropped, 0);
    }

    #[test]
    fn ordered_set_insert_reports_outcome() {
        let mut set = OrderedSet::new();
        assert!(set.is_empty());
        assert!(set.insert(Item { key: "k".into(), origin: "legacy" }));
        assert!(!set.insert(Item { key: "k".into(), origin: "modern" }));
        assert!(set.contains_key("k"));
        assert_eq!(set.len(), 1);
        assert_eq!(set.dropped(), 1);
        assert_eq!(set.iter().next().unwrap().origin, "legacy");
    }

    fn key_lists() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
        let key = "[a-e]{1,2}";
        (
            prop::collection::vec(key, 0..12),
            prop::collection::vec(key, 0..12),
        )
    }

    fn to_items(origin: &'static str, keys: &[String]) -> Vec<Item> {
        keys.iter()
            .map(|k| Item {
                key: k.clone(),
                origin,
            })
            .collect()
    }

    proptest! {
        #[test]
        fn no_key_appears_twice((legacy, modern) in key_lists()) {
            let out = dedup_ordered(to_items("legacy", &legacy), to_items("modern", &modern));
            let unique: HashSet<&str> = keys(&out).into_iter().collect();
            prop_assert_eq!(unique.len(), out.items.len());
        }

        #[test]
        fn every_input_key_is_kept((legacy, modern) in key_lists()) {
            let out = dedup_ordered(to_items("legacy", &legacy), to_items("modern", &modern));
            let kept: HashSet<&str> = keys(&out).into_iter().collect();
            for k in legacy.iter().chain(modern.iter()) {
                prop_assert!(kept.contains(k.as_str()));
            }
            prop_assert_eq!(out.items.len() + out.dropped, legacy.len() + modern.len());
        }

        #[test]
        fn first_seen_order_is_preserved((legacy, modern) in key_lists()) {
            let out = dedup_ordered(to_items("legacy", &legacy), to_items("modern", &modern));
            let mut expected: Vec<&str> = Vec::new();
            for k in legacy.iter().chain(modern.iter()) {
                if !expected.contains(&k.as_str()) {
                    expected.push(k.as_str());
                }
            }
            prop_assert_eq!(keys(&out), expected);
        }

        #[test]
        fn legacy_wins_shared_keys((legacy, modern) in key_lists()) {
            let out = dedup_ordered(to_items("legacy", &legacy), to_items("modern", &modern));
            for item in &out.items {
                if legacy.contains(&item.key) {
                    prop_assert_eq!(item.origin, "legacy");
                }
            }
        }
    }
}
