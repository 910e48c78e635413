//! Error types for struct registration, validation and building.

use thiserror::Error;

use crate::value::ValueKind;

/// A type name that is neither a primitive nor a registered struct.
///
/// This signals a caller or configuration bug and is kept apart from a
/// plain "value does not match" verdict.
///
/// # Examples
///
/// ```rust
/// use shapelens::types::UnknownTypeError;
///
/// let error = UnknownTypeError::new("Usr");
/// assert_eq!(error.to_string(), "unknown type 'Usr'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type '{type_name}'")]
pub struct UnknownTypeError {
    /// The offending type name, as written by the caller.
    pub type_name: String,
}

impl UnknownTypeError {
    /// Creates an error for `type_name`.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// A schema was rejected at registration time.
///
/// Registration is atomic: when any of these is returned the registry is
/// left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The struct name is already taken.
    #[error("struct '{name}' is already registered")]
    AlreadyRegistered {
        /// The struct name.
        name: String,
    },

    /// The struct name is empty, reserved for a primitive, or contains `:`.
    #[error("'{name}' cannot be used as a struct name")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A field declares no acceptable types.
    #[error("field '{field}' of struct '{name}' has an empty type list")]
    EmptyTypeList {
        /// The struct name.
        name: String,
        /// The field name.
        field: String,
    },

    /// A field references a type that is neither primitive nor registered.
    #[error("field '{field}' of struct '{name}' references an unknown type: {source}")]
    UnknownType {
        /// The struct name.
        name: String,
        /// The field name.
        field: String,
        /// The unresolved type.
        source: UnknownTypeError,
    },

    /// A field's default does not satisfy any of its declared types.
    #[error("default for field '{field}' of struct '{name}' is a {found}, which none of its types accept")]
    InvalidDefault {
        /// The struct name.
        name: String,
        /// The field name.
        field: String,
        /// The kind of the rejected default.
        found: ValueKind,
    },

    /// A schema literal does not have the `{ field: [[types...], default?] }` shape.
    #[error("malformed schema definition: {reason}")]
    MalformedDefinition {
        /// What was wrong with the literal.
        reason: String,
    },

    /// The registry has been frozen and accepts no more schemas.
    #[error("cannot register '{name}': the registry is frozen")]
    RegistryFrozen {
        /// The struct name that was refused.
        name: String,
    },
}

/// `build` could not produce a complete, schema-satisfying value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The struct to build is not registered.
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),

    /// A field without a default was not supplied.
    #[error("struct '{name}' is missing required field '{field}'")]
    MissingField {
        /// The struct name.
        name: String,
        /// The missing field.
        field: String,
    },

    /// A field holds a value that none of its declared types accept.
    #[error("field '{field}' of struct '{name}' does not accept a {found}")]
    MismatchedField {
        /// The struct name.
        name: String,
        /// The mismatched field.
        field: String,
        /// The kind of the rejected value.
        found: ValueKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_schema_error_display_names_struct_and_field() {
        let error = SchemaError::UnknownType {
            name: "Account".to_string(),
            field: "user".to_string(),
            source: UnknownTypeError::new("User"),
        };
        assert_eq!(
            error.to_string(),
            "field 'user' of struct 'Account' references an unknown type: unknown type 'User'"
        );
    }

    #[rstest]
    fn test_validation_error_from_unknown_type() {
        let error = ValidationError::from(UnknownTypeError::new("Ghost"));
        assert_eq!(error.to_string(), "unknown type 'Ghost'");
    }

    #[rstest]
    fn test_mismatched_field_display() {
        let error = ValidationError::MismatchedField {
            name: "User".to_string(),
            field: "age".to_string(),
            found: ValueKind::Bool,
        };
        assert_eq!(
            error.to_string(),
            "field 'age' of struct 'User' does not accept a bool"
        );
    }
}
