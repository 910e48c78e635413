//! Ordered list of values with structural sharing.

use std::fmt;
use std::iter::FromIterator;

use super::{ReferenceCounter, Value};

/// An ordered list of [`Value`]s.
///
/// Like [`Mapping`](super::Mapping), clones share the element buffer and an
/// update copies it only when it is shared.
///
/// # Example
///
/// ```rust
/// use shapelens::value::{Sequence, Value};
///
/// let numbers: Sequence = [1, 2, 3].into_iter().map(Value::from).collect();
/// let updated = numbers.clone().update(1, Value::from(20)).unwrap();
///
/// assert_eq!(numbers.get(1), Some(&Value::from(2)));
/// assert_eq!(updated.get(1), Some(&Value::from(20)));
/// assert!(numbers.clone().update(3, Value::Null).is_none());
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Sequence {
    elements: ReferenceCounter<Vec<Value>>,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    /// Returns a sequence with the element at `index` replaced.
    ///
    /// Returns `None` if `index` is out of bounds.
    #[must_use]
    pub fn update(self, index: usize, value: Value) -> Option<Self> {
        if index >= self.len() {
            return None;
        }
        let mut elements = self.elements;
        ReferenceCounter::make_mut(&mut elements)[index] = value;
        Some(Self { elements })
    }

    /// Returns a sequence with `value` appended.
    #[must_use]
    pub fn push(self, value: impl Into<Value>) -> Self {
        let mut elements = self.elements;
        ReferenceCounter::make_mut(&mut elements).push(value.into());
        Self { elements }
    }

    /// Returns `true` if both sequences share the same element buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.elements, &other.elements)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(elements: Vec<Value>) -> Self {
        Self {
            elements: ReferenceCounter::new(elements),
        }
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
