//! The struct registry, validator and builder.

use std::collections::HashMap;

use super::error::{SchemaError, UnknownTypeError, ValidationError};
use super::schema::{FieldSpec, SchemaDefinition, StructSchema};
use super::spec::{TypeSpec, is_struct_name};
use crate::value::{Mapping, Value};

/// A table of named struct schemas.
///
/// Schemas are registered leaves first: a schema may only reference
/// primitives and structs that are already registered. This makes
/// recursive validation terminate, since no struct can reach itself.
///
/// The registry is an ordinary value owned by the application. For a
/// registry shared between threads, see
/// [`SharedRegistry`](super::SharedRegistry).
///
/// # Examples
///
/// ```rust
/// use shapelens::record;
/// use shapelens::types::{SchemaDefinition, TypeRegistry};
/// use shapelens::value::Value;
///
/// let mut registry = TypeRegistry::new();
/// registry
///     .register("User", SchemaDefinition::new().field("name", ["string"]))
///     .unwrap();
/// registry
///     .register(
///         "Account",
///         SchemaDefinition::new()
///             .field_with_default("id", ["int"], 2)
///             .field("user", ["User"]),
///     )
///     .unwrap();
///
/// let account = record! { "id" => 1, "user" => record! { "name" => "x" } };
/// assert_eq!(registry.validate("Account", &account), Ok(true));
///
/// let built = registry
///     .build("Account", record! { "user" => record! { "name" => "x" } }.into_mapping().unwrap())
///     .unwrap();
/// assert_eq!(built.get("id"), Some(&Value::from(2)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    schemas: HashMap<String, StructSchema>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a struct schema under `name`.
    ///
    /// Every type name is resolved against the primitives and the structs
    /// registered so far, and every default must satisfy at least one of its
    /// field's types.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::AlreadyRegistered`] if `name` is taken
    /// - [`SchemaError::InvalidName`] if `name` cannot name a struct
    /// - [`SchemaError::EmptyTypeList`] if a field lists no types
    /// - [`SchemaError::UnknownType`] if a field references an unknown type,
    ///   including `name` itself
    /// - [`SchemaError::InvalidDefault`] if a default fits none of its types
    ///
    /// On error the registry is unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        definition: SchemaDefinition,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        let schema = match self.resolve_schema(&name, &definition) {
            Ok(schema) => schema,
            Err(error) => {
                tracing::warn!(%name, %error, "rejected struct schema");
                return Err(error);
            }
        };
        tracing::debug!(%name, fields = schema.fields().len(), "registered struct schema");
        self.schemas.insert(name, schema);
        Ok(())
    }

    fn resolve_schema(
        &self,
        name: &str,
        definition: &SchemaDefinition,
    ) -> Result<StructSchema, SchemaError> {
        if !is_struct_name(name) {
            return Err(SchemaError::InvalidName {
                name: name.to_owned(),
            });
        }
        if self.contains(name) {
            return Err(SchemaError::AlreadyRegistered {
                name: name.to_owned(),
            });
        }
        let fields = definition
            .fields()
            .map(|(field, field_definition)| {
                if field_definition.types().is_empty() {
                    return Err(SchemaError::EmptyTypeList {
                        name: name.to_owned(),
                        field: field.to_owned(),
                    });
                }
                let types = field_definition
                    .types()
                    .iter()
                    .map(|type_name| self.resolve(type_name))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| SchemaError::UnknownType {
                        name: name.to_owned(),
                        field: field.to_owned(),
                        source,
                    })?;
                let spec = FieldSpec::new(
                    field.to_owned(),
                    types,
                    field_definition.default_value().cloned(),
                );
                match spec.default_value() {
                    Some(default) if !self.accepts(&spec, default) => {
                        Err(SchemaError::InvalidDefault {
                            name: name.to_owned(),
                            field: field.to_owned(),
                            found: default.kind(),
                        })
                    }
                    _ => Ok(spec),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StructSchema::new(name.to_owned(), fields))
    }

    /// Returns the schema registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&StructSchema> {
        self.schemas.get(name)
    }

    /// Returns `true` if a struct called `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the registered struct names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered structs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns `true` if no struct is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Parses `type_name` and checks that any struct it mentions is
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTypeError`] if the name is malformed or mentions an
    /// unregistered struct.
    pub fn resolve(&self, type_name: &str) -> Result<TypeSpec, UnknownTypeError> {
        let spec = TypeSpec::parse(type_name)?;
        match spec.referenced_struct() {
            Some(name) if !self.contains(name) => Err(UnknownTypeError::new(type_name)),
            _ => Ok(spec),
        }
    }

    /// Validates `value` against the type named `type_name`.
    ///
    /// `Ok(false)` means the value does not match. The error channel is
    /// reserved for type names that are neither primitive nor registered.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTypeError`] if `type_name` does not resolve.
    pub fn validate(&self, type_name: &str, value: &Value) -> Result<bool, UnknownTypeError> {
        let spec = self.resolve(type_name)?;
        Ok(self.check(&spec, value))
    }

    /// Validates `value` against an already-resolved type.
    ///
    /// A struct that is not registered matches nothing.
    #[must_use]
    pub fn check(&self, spec: &TypeSpec, value: &Value) -> bool {
        match spec {
            TypeSpec::Primitive(primitive) => primitive.matches(value),
            TypeSpec::SequenceOf(element) => value
                .as_sequence()
                .is_some_and(|sequence| sequence.iter().all(|item| self.check(element, item))),
            TypeSpec::Struct(name) => self
                .lookup(name)
                .is_some_and(|schema| self.conforms(schema, value)),
        }
    }

    /// A struct value must be a mapping holding every declared field, each
    /// accepted by at least one of its types. Extra keys are allowed.
    fn conforms(&self, schema: &StructSchema, value: &Value) -> bool {
        value.as_mapping().is_some_and(|mapping| {
            schema.fields().iter().all(|field| {
                mapping
                    .get(field.name())
                    .is_some_and(|item| self.accepts(field, item))
            })
        })
    }

    fn accepts(&self, field: &FieldSpec, value: &Value) -> bool {
        field.types().iter().any(|spec| self.check(spec, value))
    }

    /// Builds a complete value of struct `name`.
    ///
    /// Starts from the schema defaults, overlays `overrides` (overrides win),
    /// then validates the result. Only top-level fields are defaulted;
    /// nested structs must be supplied whole. Keys in `overrides` that the
    /// schema does not declare are kept.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::UnknownType`] if `name` is not registered
    /// - [`ValidationError::MissingField`] for the first declared field that
    ///   is neither defaulted nor supplied
    /// - [`ValidationError::MismatchedField`] for the first declared field
    ///   whose value none of its types accept
    pub fn build(&self, name: &str, overrides: Mapping) -> Result<Mapping, ValidationError> {
        let schema = self
            .lookup(name)
            .ok_or_else(|| UnknownTypeError::new(name))?;
        let merged = schema.defaults().merge(&overrides);
        for field in schema.fields() {
            match merged.get(field.name()) {
                None => {
                    tracing::trace!(struct_name = name, field = field.name(), "missing required field");
                    return Err(ValidationError::MissingField {
                        name: name.to_owned(),
                        field: field.name().to_owned(),
                    });
                }
                Some(value) if !self.accepts(field, value) => {
                    tracing::trace!(
                        struct_name = name,
                        field = field.name(),
                        found = %value.kind(),
                        "mismatched field"
                    );
                    return Err(ValidationError::MismatchedField {
                        name: name.to_owned(),
                        field: field.name().to_owned(),
                        found: value.kind(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use crate::{record, sequence};
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register(
                "User",
                SchemaDefinition::new()
                    .field("name", ["string"])
                    .field("age", ["string", "int", "float"]),
            )
            .unwrap();
        registry
            .register(
                "Account",
                SchemaDefinition::new()
                    .field_with_default("id", ["int"], 2)
                    .field("user", ["User"]),
            )
            .unwrap();
        registry
    }

    #[rstest]
    fn test_register_rejects_duplicate(mut registry: TypeRegistry) {
        let result = registry.register("User", SchemaDefinition::new());
        assert_eq!(
            result,
            Err(SchemaError::AlreadyRegistered {
                name: "User".to_string()
            })
        );
    }

    #[rstest]
    fn test_register_rejects_self_reference(mut registry: TypeRegistry) {
        let result = registry.register("Node", SchemaDefinition::new().field("next", ["Node"]));
        assert!(matches!(result, Err(SchemaError::UnknownType { .. })));
        assert!(!registry.contains("Node"));
    }

    #[rstest]
    fn test_register_rejects_invalid_default_atomically(mut registry: TypeRegistry) {
        let before = registry.len();
        let result = registry.register(
            "Counter",
            SchemaDefinition::new()
                .field("label", ["string"])
                .field_with_default("count", ["int"], "zero"),
        );
        assert_eq!(
            result,
            Err(SchemaError::InvalidDefault {
                name: "Counter".to_string(),
                field: "count".to_string(),
                found: ValueKind::String,
            })
        );
        assert_eq!(registry.len(), before);
    }

    #[rstest]
    fn test_register_checks_nested_default(mut registry: TypeRegistry) {
        let bad = registry.register(
            "Session",
            SchemaDefinition::new().field_with_default("user", ["User"], record! { "name" => "x" }),
        );
        assert!(matches!(bad, Err(SchemaError::InvalidDefault { .. })));

        let good = registry.register(
            "Session",
            SchemaDefinition::new()
                .field_with_default("user", ["User"], record! { "name" => "x", "age" => 1 }),
        );
        assert_eq!(good, Ok(()));
    }

    #[rstest]
    #[case("int")]
    #[case("")]
    #[case("sequence:User")]
    fn test_register_rejects_invalid_name(mut registry: TypeRegistry, #[case] name: &str) {
        assert_eq!(
            registry.register(name, SchemaDefinition::new()),
            Err(SchemaError::InvalidName {
                name: name.to_string()
            })
        );
    }

    #[rstest]
    fn test_validate_unknown_type_is_an_error(registry: TypeRegistry) {
        assert_eq!(
            registry.validate("Ghost", &Value::Null),
            Err(UnknownTypeError::new("Ghost"))
        );
        assert_eq!(
            registry.validate("sequence:Ghost", &sequence![]),
            Err(UnknownTypeError::new("sequence:Ghost"))
        );
    }

    #[rstest]
    fn test_validate_sequence_of_struct(registry: TypeRegistry) {
        let users = sequence![
            record! { "name" => "a", "age" => 1 },
            record! { "name" => "b", "age" => "2" },
        ];
        assert_eq!(registry.validate("sequence:User", &users), Ok(true));

        let mixed = sequence![record! { "name" => "a", "age" => 1 }, 3];
        assert_eq!(registry.validate("sequence:User", &mixed), Ok(false));
    }

    #[rstest]
    fn test_validate_allows_extra_keys(registry: TypeRegistry) {
        let user = record! { "name" => "a", "age" => 1, "email" => "a@b" };
        assert_eq!(registry.validate("User", &user), Ok(true));
    }

    #[rstest]
    fn test_build_fills_defaults(registry: TypeRegistry) {
        let user = record! { "name" => "me", "age" => 65 };
        let overrides = record! { "user" => user.clone() }.into_mapping().unwrap();
        let built = registry.build("Account", overrides).unwrap();
        assert_eq!(
            Value::Mapping(built),
            record! { "id" => 2, "user" => user }
        );
    }

    #[rstest]
    fn test_build_override_wins(registry: TypeRegistry) {
        let overrides = record! { "id" => 7, "user" => record! { "name" => "me", "age" => 1 } }
            .into_mapping()
            .unwrap();
        let built = registry.build("Account", overrides).unwrap();
        assert_eq!(built.get("id"), Some(&Value::from(7)));
    }

    #[rstest]
    fn test_build_missing_required_field(registry: TypeRegistry) {
        assert_eq!(
            registry.build("Account", Mapping::new()),
            Err(ValidationError::MissingField {
                name: "Account".to_string(),
                field: "user".to_string(),
            })
        );
    }

    #[rstest]
    fn test_build_mismatched_field(registry: TypeRegistry) {
        let overrides = record! { "name" => "me", "age" => false }.into_mapping().unwrap();
        assert_eq!(
            registry.build("User", overrides),
            Err(ValidationError::MismatchedField {
                name: "User".to_string(),
                field: "age".to_string(),
                found: ValueKind::Bool,
            })
        );
    }

    #[rstest]
    fn test_build_unknown_struct(registry: TypeRegistry) {
        assert_eq!(
            registry.build("Ghost", Mapping::new()),
            Err(ValidationError::UnknownType(UnknownTypeError::new("Ghost")))
        );
    }

    #[rstest]
    fn test_names_are_sorted(registry: TypeRegistry) {
        assert_eq!(registry.names(), vec!["Account", "User"]);
    }
}
