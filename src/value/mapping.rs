//! Insertion-ordered string-keyed mapping with structural sharing.

use std::fmt;
use std::iter::FromIterator;

use indexmap::IndexMap;

use super::{ReferenceCounter, Value};

/// String keys to [`Value`]s, iterated in insertion order.
///
/// Keys are unique. Inserting an existing key replaces its value without
/// moving it. Lookups and inserts take constant time on average. Equality
/// ignores order.
///
/// All updating methods take `self` by value and return the new mapping.
/// The entry buffer is shared between clones and copied only when a shared
/// buffer is updated, so a clone taken before an update never observes it.
///
/// # Example
///
/// ```rust
/// use shapelens::value::{Mapping, Value};
///
/// let body: Mapping = [("height", Value::from(100)), ("weight", Value::from(86))]
///     .into_iter()
///     .collect();
///
/// let taller = body.clone().insert("height", 110);
///
/// assert_eq!(body.get("height"), Some(&Value::from(100)));
/// assert_eq!(taller.get("height"), Some(&Value::from(110)));
/// assert_eq!(taller.get("weight"), Some(&Value::from(86)));
/// ```
#[derive(Clone, Default)]
pub struct Mapping {
    entries: ReferenceCounter<IndexMap<String, Value>>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Returns a mapping with `key` bound to `value`.
    ///
    /// An existing key keeps its position.
    #[must_use]
    pub fn insert(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut entries = self.entries;
        ReferenceCounter::make_mut(&mut entries).insert(key.into(), value.into());
        Self { entries }
    }

    /// Returns a mapping without `key`.
    ///
    /// Removing an absent key returns the mapping unchanged and shares its
    /// buffer.
    #[must_use]
    pub fn remove(self, key: &str) -> Self {
        if !self.contains_key(key) {
            return self;
        }
        let mut entries = self.entries;
        ReferenceCounter::make_mut(&mut entries).shift_remove(key);
        Self { entries }
    }

    /// Returns a mapping holding every entry of `self` overlaid by every
    /// entry of `other`.
    ///
    /// On a key collision the value from `other` wins. Keys only present in
    /// `other` are appended in `other`'s order.
    #[must_use]
    pub fn merge(self, other: &Self) -> Self {
        if other.is_empty() {
            return self;
        }
        let mut entries = self.entries;
        ReferenceCounter::make_mut(&mut entries).extend(
            other
                .entries
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Self { entries }
    }

    /// Returns `true` if both mappings share the same entry buffer.
    ///
    /// Useful to observe structural sharing; equal mappings built
    /// independently are not `ptr_eq`.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.entries, &other.entries)
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let entries: IndexMap<String, Value> = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            entries: ReferenceCounter::new(entries),
        }
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Value)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
