//! Order-preserving first-occurrence dedup.

use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first occurrence per key, preserving input order.
///
/// The key function decides what counts as a duplicate: lowercased names
/// for datasets, exact strings for URLs, canonical labels for sources.
pub fn dedup_first<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(key(&item)) {
            out.push(item);
        }
    }
    out
}
