//! Helpers over associative containers.
//!
//! Every function takes its containers as `Option<&_>`. `None` stands for an
//! absent container and behaves exactly like an empty one, except where a
//! function documents otherwise.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::trace;

/// String-keyed, string-valued map (labels, annotations, options).
pub type StringMap = HashMap<String, String>;

/// Integer set represented as a map to a presence flag.
pub type IntSet = HashMap<i64, bool>;

/// Returns true if every key in `keys` is present in `map`.
///
/// An empty `keys` slice is vacuously contained, even in an absent map.
#[must_use]
pub fn contains_all<S: AsRef<str>>(map: Option<&StringMap>, keys: &[S]) -> bool {
    if keys.is_empty() {
        return true;
    }
    let Some(map) = map else {
        return false;
    };
    keys.iter().all(|key| map.contains_key(key.as_ref()))
}

/// Returns a new map holding the entries of both maps.
///
/// On a key collision the value from `map2` wins.
#[must_use]
pub fn union_maps_with_override(map1: Option<&StringMap>, map2: Option<&StringMap>) -> StringMap {
    let mut result = map1.cloned().unwrap_or_default();
    for (key, value) in map2.into_iter().flatten() {
        if let Some(previous) = result.insert(key.clone(), value.clone()) {
            if previous != *value {
                trace!(key = %key, "union overrode existing value");
            }
        }
    }
    result
}

/// Returns the integers present in both sets, each flagged `true`.
///
/// Only key membership is considered; the flags of the inputs are ignored.
#[must_use]
pub fn intersect_integer_sets(set1: Option<&IntSet>, set2: Option<&IntSet>) -> IntSet {
    let (Some(set1), Some(set2)) = (set1, set2) else {
        return IntSet::new();
    };
    // Walk the smaller side.
    let (small, large) = if set1.len() <= set2.len() {
        (set1, set2)
    } else {
        (set2, set1)
    };
    small
        .keys()
        .filter(|key| large.contains_key(*key))
        .map(|&key| (key, true))
        .collect()
}

/// Returns the keys of `map` in ascending lexicographic order.
#[must_use]
pub fn ordered_keys<V>(map: Option<&HashMap<String, V>>) -> Vec<String> {
    let mut keys: Vec<String> = map
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort_unstable();
    keys
}

/// Returns true if `key` is non-empty and present in `map`.
///
/// An empty key never matches, even when the map holds an empty-string key.
#[must_use]
pub fn key_matched<K, V>(map: Option<&HashMap<K, V>>, key: &str) -> bool
where
    K: Eq + Hash + Borrow<str>,
{
    if key.is_empty() {
        return false;
    }
    map.is_some_and(|m| m.contains_key(key))
}

/// Returns true if `key` is present in `map` with a value equal to `value`.
///
/// Unlike [`key_matched`], the empty key is not rejected.
#[must_use]
pub fn key_value_matched<K, V>(map: Option<&HashMap<K, V>>, key: &str, value: &V) -> bool
where
    K: Eq + Hash + Borrow<str>,
    V: PartialEq,
{
    map.and_then(|m| m.get(key)).is_some_and(|v| v == value)
}
