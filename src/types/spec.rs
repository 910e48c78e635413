//! Type names and their resolved form.
//!
//! A type name is written as a string:
//!
//! ```text
//! null | bool | int | float | string | mixed | sequence | mapping
//! sequence:<type> | array:<type>
//! <StructName>
//! ```
//!
//! [`TypeSpec::parse`] turns a name into a [`TypeSpec`] once, so validation
//! dispatches on a closed enum instead of re-reading strings.

use std::fmt;

use super::error::UnknownTypeError;
use crate::value::{Value, ValueKind};

const SEQUENCE_PREFIX: &str = "sequence:";
const ARRAY_PREFIX: &str = "array:";

/// A built-in type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Matches only `null`.
    Null,
    /// Matches booleans.
    Bool,
    /// Matches integers; floats are not accepted.
    Int,
    /// Matches floats; integers are not accepted.
    Float,
    /// Matches strings; numeric strings are not coerced.
    String,
    /// Matches anything.
    Mixed,
    /// Matches any sequence, whatever its elements.
    Sequence,
    /// Matches any mapping, whatever its entries.
    Mapping,
}

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Null,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::String,
        Self::Mixed,
        Self::Sequence,
        Self::Mapping,
    ];

    /// Looks a primitive up by its name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shapelens::types::Primitive;
    ///
    /// assert_eq!(Primitive::from_name("int"), Some(Primitive::Int));
    /// assert_eq!(Primitive::from_name("User"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|primitive| primitive.name() == name)
    }

    /// Returns the name of this primitive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Mixed => "mixed",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }

    /// Returns `true` if `value` is of this primitive's kind.
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        let kind = value.kind();
        match self {
            Self::Mixed => true,
            Self::Null => matches!(kind, ValueKind::Null),
            Self::Bool => matches!(kind, ValueKind::Bool),
            Self::Int => matches!(kind, ValueKind::Int),
            Self::Float => matches!(kind, ValueKind::Float),
            Self::String => matches!(kind, ValueKind::String),
            Self::Sequence => matches!(kind, ValueKind::Sequence),
            Self::Mapping => matches!(kind, ValueKind::Mapping),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A parsed type name.
///
/// A `TypeSpec` only records the names of the structs it mentions. Whether
/// those structs exist is decided by a
/// [`TypeRegistry`](super::TypeRegistry).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    /// A built-in type.
    Primitive(Primitive),
    /// A sequence whose elements all satisfy the inner type.
    SequenceOf(Box<Self>),
    /// A struct, by name.
    Struct(String),
}

impl TypeSpec {
    /// Parses a type name.
    ///
    /// Names are matched exactly, surrounding whitespace included.
    /// `array:<type>` is accepted as an alias of `sequence:<type>`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTypeError`] if the name is empty, has an empty
    /// element type, or names a struct with characters no struct name may
    /// contain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shapelens::types::{Primitive, TypeSpec};
    ///
    /// let spec = TypeSpec::parse("array:int").unwrap();
    /// assert_eq!(spec, TypeSpec::sequence_of(TypeSpec::Primitive(Primitive::Int)));
    /// assert_eq!(spec.to_string(), "sequence:int");
    ///
    /// assert!(TypeSpec::parse("sequence:").is_err());
    /// ```
    pub fn parse(type_name: &str) -> Result<Self, UnknownTypeError> {
        if let Some(primitive) = Primitive::from_name(type_name) {
            return Ok(Self::Primitive(primitive));
        }
        let element = type_name
            .strip_prefix(SEQUENCE_PREFIX)
            .or_else(|| type_name.strip_prefix(ARRAY_PREFIX));
        if let Some(element) = element {
            return Self::parse(element)
                .map(Self::sequence_of)
                .map_err(|_| UnknownTypeError::new(type_name));
        }
        if is_struct_name(type_name) {
            Ok(Self::Struct(type_name.to_owned()))
        } else {
            Err(UnknownTypeError::new(type_name))
        }
    }

    /// Creates a sequence-of type.
    #[must_use]
    pub fn sequence_of(element: Self) -> Self {
        Self::SequenceOf(Box::new(element))
    }

    /// Returns the struct this type ultimately refers to, looking through
    /// any number of `sequence:` wrappers.
    #[must_use]
    pub fn referenced_struct(&self) -> Option<&str> {
        match self {
            Self::Primitive(_) => None,
            Self::SequenceOf(element) => element.referenced_struct(),
            Self::Struct(name) => Some(name),
        }
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(formatter, "{primitive}"),
            Self::SequenceOf(element) => write!(formatter, "{SEQUENCE_PREFIX}{element}"),
            Self::Struct(name) => formatter.write_str(name),
        }
    }
}

/// Returns `true` if `name` may be used as a struct name.
///
/// Struct names are non-empty, contain no `:` or whitespace, and do not
/// shadow a primitive.
pub(crate) fn is_struct_name(name: &str) -> bool {
    !name.is_empty()
        && Primitive::from_name(name).is_none()
        && !name.chars().any(|character| character == ':' || character.is_whitespace())
}
