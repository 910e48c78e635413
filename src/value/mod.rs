//! Dynamic, JSON-like values.
//!
//! This module provides [`Value`], the universal value type that struct
//! schemas validate and lenses focus into:
//!
//! - [`Value`]: null, bool, int, float, string, sequence or mapping
//! - [`Sequence`]: an ordered list of values
//! - [`Mapping`]: string keys to values, in insertion order
//! - [`ValueKind`]: the variant of a value, without its payload
//!
//! # Structural Sharing
//!
//! Containers hold their elements behind a reference counter, so cloning a
//! value never copies its children. Updating a container copies only that
//! container; untouched siblings stay shared between the old and the new
//! version.
//!
//! # Examples
//!
//! ```rust
//! use shapelens::record;
//! use shapelens::value::Value;
//!
//! let user = record! { "name" => "mark", "age" => 65 };
//! let mapping = user.as_mapping().unwrap();
//!
//! assert_eq!(mapping.get("name"), Some(&Value::from("mark")));
//!
//! // The original mapping is preserved
//! let renamed = mapping.clone().insert("name", "alice");
//! assert_eq!(mapping.get("name"), Some(&Value::from("mark")));
//! assert_eq!(renamed.get("name"), Some(&Value::from("alice")));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod mapping;
mod sequence;

#[cfg(feature = "serde")]
mod json;

pub use mapping::Mapping;
pub use sequence::Sequence;

use std::fmt;

/// A dynamically-typed value.
///
/// Equality is structural. Two mappings are equal when they hold the same
/// keys with equal values, regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The absent value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    String(String),
    /// An ordered list of values.
    Sequence(Sequence),
    /// String keys to values, in insertion order.
    Mapping(Mapping),
}

/// The variant of a [`Value`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Mapping`]
    Mapping,
}

impl ValueKind {
    /// Returns the lower-case name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl Value {
    /// Returns the kind of this value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shapelens::value::{Value, ValueKind};
    ///
    /// assert_eq!(Value::from(1).kind(), ValueKind::Int);
    /// assert_eq!(Value::from(1.0).kind(), ValueKind::Float);
    /// assert_eq!(Value::Null.kind(), ValueKind::Null);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Returns `true` if this value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this value is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this value is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float, if this value is one.
    ///
    /// Integers are not widened; `Value::Int(1).as_float()` is `None`.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string slice, if this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the sequence, if this value is one.
    #[must_use]
    pub const fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Returns the mapping, if this value is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Consumes the value and returns the mapping, if it is one.
    #[must_use]
    pub fn into_mapping(self) -> Option<Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::Sequence(Sequence::from(elements))
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Self::Sequence(sequence)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// =============================================================================
// Literal Macros
// =============================================================================

/// Creates a [`Value::Mapping`] from `key => value` pairs.
///
/// Values go through [`Value::from`], so literals, strings and nested
/// `record!`/`sequence!` invocations can be mixed freely. A repeated key
/// keeps its first position and its last value.
///
/// # Example
///
/// ```rust
/// use shapelens::{record, sequence};
/// use shapelens::value::Value;
///
/// let account = record! {
///     "id" => 1,
///     "user" => record! { "name" => "mark" },
///     "tags" => sequence!["admin", "ops"],
/// };
///
/// let user = account.as_mapping().unwrap().get("user").unwrap();
/// assert_eq!(user.as_mapping().unwrap().get("name"), Some(&Value::from("mark")));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::value::Value::Mapping($crate::value::Mapping::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::value::Value::Mapping(
            [$(($key, $crate::value::Value::from($value))),+]
                .into_iter()
                .collect::<$crate::value::Mapping>(),
        )
    };
}

/// Creates a [`Value::Sequence`] from a list of values.
///
/// # Example
///
/// ```rust
/// use shapelens::sequence;
///
/// let numbers = sequence![1, 2, 3];
/// assert_eq!(numbers.as_sequence().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::value::Value::Sequence($crate::value::Sequence::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::value::Value::Sequence(
            [$($crate::value::Value::from($value)),+]
                .into_iter()
                .collect::<$crate::value::Sequence>(),
        )
    };
}
