//! Keyed containers and the point lens over them.
//!
//! [`Keyed`] abstracts "a container whose items are addressed by a key":
//! [`Mapping`] and [`HashMap`]/[`BTreeMap`] by key, [`Sequence`] by index,
//! and [`Value`] by either, depending on which container it holds.
//! [`KeyLens`] is the one lens that works for all of them.
//!
//! # Missing Keys
//!
//! Reading a missing key fails with [`LensError::KeyNotFound`] (or
//! [`LensError::IndexOutOfBounds`] for sequences). Writing a missing key
//! into a map inserts it; writing past the end of a sequence fails.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use super::error::{LensError, LensResult};
use super::lens::Lens;
use crate::value::{Mapping, Sequence, Value, ValueKind};

/// A container whose items are addressed by keys of type `K`.
pub trait Keyed<K> {
    /// The item type.
    type Item;

    /// Returns the item stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`LensError`] if `key` is absent or the container cannot
    /// be addressed by `K`.
    fn lookup(&self, key: &K) -> LensResult<&Self::Item>;

    /// Returns the container with `key` bound to `item`.
    ///
    /// # Errors
    ///
    /// Returns a [`LensError`] if `key` cannot be written in this container.
    fn with_entry(self, key: &K, item: Self::Item) -> LensResult<Self>
    where
        Self: Sized;
}

impl Keyed<String> for Mapping {
    type Item = Value;

    fn lookup(&self, key: &String) -> LensResult<&Value> {
        self.get(key).ok_or_else(|| LensError::key_not_found(key))
    }

    fn with_entry(self, key: &String, item: Value) -> LensResult<Self> {
        Ok(self.insert(key.as_str(), item))
    }
}

impl Keyed<usize> for Sequence {
    type Item = Value;

    fn lookup(&self, key: &usize) -> LensResult<&Value> {
        self.get(*key).ok_or(LensError::IndexOutOfBounds {
            index: *key,
            len: self.len(),
        })
    }

    fn with_entry(self, key: &usize, item: Value) -> LensResult<Self> {
        let len = self.len();
        self.update(*key, item)
            .ok_or(LensError::IndexOutOfBounds { index: *key, len })
    }
}

impl Keyed<String> for Value {
    type Item = Self;

    fn lookup(&self, key: &String) -> LensResult<&Self> {
        match self {
            Self::Mapping(mapping) => mapping.lookup(key),
            other => Err(not_a_container(ValueKind::Mapping, other)),
        }
    }

    fn with_entry(self, key: &String, item: Self) -> LensResult<Self> {
        match self {
            Self::Mapping(mapping) => mapping.with_entry(key, item).map(Self::Mapping),
            other => Err(not_a_container(ValueKind::Mapping, &other)),
        }
    }
}

impl Keyed<usize> for Value {
    type Item = Self;

    fn lookup(&self, key: &usize) -> LensResult<&Self> {
        match self {
            Self::Sequence(sequence) => sequence.lookup(key),
            other => Err(not_a_container(ValueKind::Sequence, other)),
        }
    }

    fn with_entry(self, key: &usize, item: Self) -> LensResult<Self> {
        match self {
            Self::Sequence(sequence) => sequence.with_entry(key, item).map(Self::Sequence),
            other => Err(not_a_container(ValueKind::Sequence, &other)),
        }
    }
}

const fn not_a_container(expected: ValueKind, found: &Value) -> LensError {
    LensError::NotAContainer {
        expected,
        found: found.kind(),
    }
}

impl<K, V, H> Keyed<K> for HashMap<K, V, H>
where
    K: Eq + Hash + Clone + Display,
    H: BuildHasher,
{
    type Item = V;

    fn lookup(&self, key: &K) -> LensResult<&V> {
        self.get(key).ok_or_else(|| LensError::key_not_found(key))
    }

    fn with_entry(mut self, key: &K, item: V) -> LensResult<Self> {
        self.insert(key.clone(), item);
        Ok(self)
    }
}

impl<K, V> Keyed<K> for BTreeMap<K, V>
where
    K: Ord + Clone + Display,
{
    type Item = V;

    fn lookup(&self, key: &K) -> LensResult<&V> {
        self.get(key).ok_or_else(|| LensError::key_not_found(key))
    }

    fn with_entry(mut self, key: &K, item: V) -> LensResult<Self> {
        self.insert(key.clone(), item);
        Ok(self)
    }
}

/// A lens focusing on the item stored under one key of a [`Keyed`]
/// container.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use shapelens::optics::{KeyLens, Lens};
///
/// let scores: BTreeMap<String, i32> = [("ada".to_string(), 3)].into_iter().collect();
/// let ada = KeyLens::new("ada".to_string());
///
/// assert_eq!(ada.get(&scores), Ok(3));
/// let updated = ada.modify(scores, |score| score + 1).unwrap();
/// assert_eq!(updated["ada"], 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyLens<K> {
    key: K,
}

impl<K> KeyLens<K> {
    /// Creates a lens focusing on `key`.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Returns the focused key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<C, K> Lens<C, <C as Keyed<K>>::Item> for KeyLens<K>
where
    C: Keyed<K>,
    <C as Keyed<K>>::Item: Clone,
{
    fn get(&self, source: &C) -> LensResult<<C as Keyed<K>>::Item> {
        source.lookup(&self.key).cloned()
    }

    fn set(&self, source: C, value: <C as Keyed<K>>::Item) -> LensResult<C> {
        source.with_entry(&self.key, value)
    }
}
