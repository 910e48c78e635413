//! Struct schema definitions and their resolved form.
//!
//! A [`SchemaDefinition`] is what callers write: field names mapped to type
//! names and optional defaults. Registering it in a
//! [`TypeRegistry`](super::TypeRegistry) checks it and produces a
//! [`StructSchema`], whose types are resolved [`TypeSpec`]s.

use super::error::SchemaError;
use super::spec::TypeSpec;
use crate::value::{Mapping, Value};

/// The declaration of one field: acceptable type names and an optional default.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    types: Vec<String>,
    default: Option<Value>,
}

impl FieldDefinition {
    /// Returns the acceptable type names, in tie-break order.
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Returns the default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// An unchecked struct schema, in field declaration order.
///
/// # Examples
///
/// ```rust
/// use shapelens::types::SchemaDefinition;
///
/// let account = SchemaDefinition::new()
///     .field_with_default("id", ["int"], 2)
///     .field("user", ["User"]);
///
/// assert_eq!(account.len(), 2);
/// ```
///
/// The same definition written as a literal:
///
/// ```rust
/// use shapelens::{record, sequence};
/// use shapelens::types::SchemaDefinition;
///
/// let literal = record! {
///     "id" => sequence![sequence!["int"], 2],
///     "user" => sequence![sequence!["User"]],
/// };
/// let account = SchemaDefinition::from_value(&literal).unwrap();
/// assert_eq!(account.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaDefinition {
    fields: Vec<(String, FieldDefinition)>,
}

impl SchemaDefinition {
    /// Creates a definition with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field with no default.
    ///
    /// Redeclaring a field replaces the earlier declaration.
    #[must_use]
    pub fn field<I, T>(self, name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.declare(name.into(), types, None)
    }

    /// Adds a field with a default, used by `build` when the field is not
    /// supplied.
    #[must_use]
    pub fn field_with_default<I, T>(
        self,
        name: impl Into<String>,
        types: I,
        default: impl Into<Value>,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.declare(name.into(), types, Some(default.into()))
    }

    fn declare<I, T>(mut self, name: String, types: I, default: Option<Value>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let definition = FieldDefinition {
            types: types.into_iter().map(Into::into).collect(),
            default,
        };
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = definition,
            None => self.fields.push((name, definition)),
        }
        self
    }

    /// Decodes a schema literal of the shape `{ field: [[type, ...], default?] }`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedDefinition`] if the literal is not a
    /// mapping, a field is not a one- or two-element sequence, or a type
    /// list holds anything but strings. An empty type list decodes fine
    /// and is rejected at registration.
    pub fn from_value(literal: &Value) -> Result<Self, SchemaError> {
        let mapping = literal
            .as_mapping()
            .ok_or_else(|| malformed(format!("expected a mapping, found a {}", literal.kind())))?;
        mapping
            .iter()
            .try_fold(Self::new(), |definition, (name, field)| {
                let parts = field
                    .as_sequence()
                    .filter(|parts| (1..=2).contains(&parts.len()))
                    .ok_or_else(|| {
                        malformed(format!("field '{name}' must be [[types...], default?]"))
                    })?;
                let types = parts
                    .get(0)
                    .and_then(Value::as_sequence)
                    .ok_or_else(|| malformed(format!("field '{name}' must start with a type list")))?
                    .iter()
                    .map(|type_name| {
                        type_name.as_str().map(str::to_owned).ok_or_else(|| {
                            malformed(format!(
                                "field '{name}' lists a {} where a type name was expected",
                                type_name.kind()
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(definition.declare(name.to_owned(), types, parts.get(1).cloned()))
            })
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the field declarations in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }
}

fn malformed(reason: String) -> SchemaError {
    SchemaError::MalformedDefinition { reason }
}

/// A field of a registered struct.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    name: String,
    types: Vec<TypeSpec>,
    default: Option<Value>,
}

impl FieldSpec {
    pub(crate) const fn new(name: String, types: Vec<TypeSpec>, default: Option<Value>) -> Self {
        Self {
            name,
            types,
            default,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the acceptable types, in tie-break order.
    #[must_use]
    pub fn types(&self) -> &[TypeSpec] {
        &self.types
    }

    /// Returns the default, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// A registered, resolved struct schema.
///
/// Immutable once registered.
#[derive(Clone, Debug, PartialEq)]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl StructSchema {
    pub(crate) const fn new(name: String, fields: Vec<FieldSpec>) -> Self {
        Self { name, fields }
    }

    /// Returns the struct name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns a mapping of every field that declares a default to that
    /// default. Fields without a default are omitted.
    #[must_use]
    pub fn defaults(&self) -> Mapping {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .default
                    .as_ref()
                    .map(|default| (field.name.as_str(), default.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, sequence};
    use rstest::rstest;

    #[rstest]
    fn test_redeclaring_a_field_replaces_it() {
        let definition = SchemaDefinition::new()
            .field("age", ["string"])
            .field("name", ["string"])
            .field("age", ["int", "float"]);

        let fields: Vec<(&str, &[String])> = definition
            .fields()
            .map(|(name, field)| (name, field.types()))
            .collect();
        assert_eq!(fields[0].0, "age");
        assert_eq!(fields[0].1, ["int".to_string(), "float".to_string()]);
        assert_eq!(definition.len(), 2);
    }

    #[rstest]
    fn test_from_value_reads_default() {
        let literal = record! { "id" => sequence![sequence!["int"], 2] };
        let definition = SchemaDefinition::from_value(&literal).unwrap();
        let (_, id) = definition.fields().next().unwrap();
        assert_eq!(id.default_value(), Some(&Value::from(2)));
    }

    #[rstest]
    #[case(sequence!["int"])]
    #[case(record! { "id" => "int" })]
    #[case(record! { "id" => sequence![] })]
    #[case(record! { "id" => sequence![sequence!["int"], 1, 2] })]
    #[case(record! { "id" => sequence!["int"] })]
    #[case(record! { "id" => sequence![sequence![1]] })]
    fn test_from_value_rejects_malformed_literal(#[case] literal: Value) {
        assert!(matches!(
            SchemaDefinition::from_value(&literal),
            Err(SchemaError::MalformedDefinition { .. })
        ));
    }

    #[rstest]
    fn test_defaults_omit_fields_without_default() {
        let schema = StructSchema::new(
            "Account".to_string(),
            vec![
                FieldSpec::new("id".to_string(), vec![], Some(Value::from(2))),
                FieldSpec::new("user".to_string(), vec![], None),
            ],
        );
        let defaults = schema.defaults();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("id"), Some(&Value::from(2)));
    }
}
