#![cfg(feature = "types")]
//! Integration tests for the type registry.
//!
//! Covers struct completeness, union-typed fields, nested struct
//! composition, typed sequences and `build` with defaults.

use rstest::{fixture, rstest};
use shapelens::types::{
    SchemaDefinition, SchemaError, TypeRegistry, TypeSpec, UnknownTypeError, ValidationError,
};
use shapelens::value::{Mapping, Value, ValueKind};
use shapelens::{record, sequence};

// =============================================================================
// Fixtures
// =============================================================================

fn mapping(value: Value) -> Mapping {
    value.into_mapping().unwrap()
}

#[fixture]
fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register("User", SchemaDefinition::new().field("name", ["string"]))
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

// =============================================================================
// Struct Completeness
// =============================================================================

#[rstest]
#[case(record! { "a" => 1, "b" => "x" }, true)]
#[case(record! { "a" => 1 }, false)]
#[case(record! { "a" => "1", "b" => "x" }, false)]
#[case(record! { "a" => 1, "b" => "x", "c" => Value::Null }, true)]
#[case(sequence![1, "x"], false)]
#[case(Value::Null, false)]
fn test_struct_completeness(#[case] value: Value, #[case] expected: bool) {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            "S",
            SchemaDefinition::new().field("a", ["int"]).field("b", ["string"]),
        )
        .unwrap();

    assert_eq!(registry.validate("S", &value), Ok(expected));
}

// =============================================================================
// Union-of-Types Fields
// =============================================================================

#[rstest]
#[case(Value::from(65), true)]
#[case(Value::from("65"), true)]
#[case(Value::from(65.0), true)]
#[case(Value::from(false), false)]
#[case(Value::Null, false)]
fn test_union_typed_field(#[case] age: Value, #[case] expected: bool) {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            "Person",
            SchemaDefinition::new().field("age", ["string", "int", "float"]),
        )
        .unwrap();

    assert_eq!(
        registry.validate("Person", &record! { "age" => age }),
        Ok(expected)
    );
}

// =============================================================================
// Nested Structs
// =============================================================================

#[rstest]
fn test_nested_struct_valid(registry: TypeRegistry) {
    let account = record! { "id" => 1, "user" => record! { "name" => "x" } };
    assert_eq!(registry.validate("Account", &account), Ok(true));
}

#[rstest]
fn test_nested_struct_missing_inner_field(registry: TypeRegistry) {
    let account = record! { "id" => 1, "user" => record! {} };
    assert_eq!(registry.validate("Account", &account), Ok(false));
}

#[rstest]
fn test_nested_struct_registered_out_of_order_is_rejected() {
    let mut registry = TypeRegistry::new();
    let result = registry.register("Account", SchemaDefinition::new().field("user", ["User"]));

    assert_eq!(
        result,
        Err(SchemaError::UnknownType {
            name: "Account".to_string(),
            field: "user".to_string(),
            source: UnknownTypeError::new("User"),
        })
    );
    assert!(registry.is_empty());
}

#[rstest]
#[case("sequence:User")]
#[case("array:User")]
fn test_sequence_of_struct_checks_every_element(registry: TypeRegistry, #[case] type_name: &str) {
    let users = sequence![record! { "name" => "a" }, record! { "name" => "b" }];
    let broken = sequence![record! { "name" => "a" }, record! { "nick" => "b" }];

    assert_eq!(registry.validate(type_name, &users), Ok(true));
    assert_eq!(registry.validate(type_name, &broken), Ok(false));
    assert_eq!(registry.validate(type_name, &sequence![]), Ok(true));
}

#[rstest]
fn test_array_alias_resolves_to_sequence(registry: TypeRegistry) {
    assert_eq!(
        registry.resolve("array:int"),
        registry.resolve("sequence:int")
    );
    assert_eq!(
        registry.validate("array:int", &sequence![1, 2, 3]),
        Ok(true)
    );
    assert_eq!(registry.validate("array:int", &sequence![1, "2"]), Ok(false));
}

#[rstest]
fn test_nested_typed_sequences(registry: TypeRegistry) {
    let spec = registry.resolve("sequence:sequence:int").unwrap();
    assert_eq!(
        spec,
        TypeSpec::sequence_of(TypeSpec::sequence_of(TypeSpec::parse("int").unwrap()))
    );
    assert!(registry.check(&spec, &sequence![sequence![1], sequence![]]));
    assert!(!registry.check(&spec, &sequence![1]));
}

#[rstest]
#[case("Usr")]
#[case("sequence:Usr")]
#[case("")]
#[case(" User ")]
#[case(" int ")]
fn test_unknown_type_is_an_error(registry: TypeRegistry, #[case] type_name: &str) {
    assert_eq!(
        registry.validate(type_name, &Value::Null),
        Err(UnknownTypeError::new(type_name))
    );
}

// =============================================================================
// Build
// =============================================================================

#[rstest]
fn test_build_fills_defaults(registry: TypeRegistry) {
    let user = record! { "name" => "mark" };
    let built = registry
        .build("Account", mapping(record! { "user" => user.clone() }))
        .unwrap();

    assert_eq!(built, mapping(record! { "id" => 2, "user" => user }));
}

#[rstest]
fn test_build_override_wins(registry: TypeRegistry) {
    let built = registry
        .build(
            "Account",
            mapping(record! { "id" => 7, "user" => record! { "name" => "mark" } }),
        )
        .unwrap();

    assert_eq!(built.get("id"), Some(&Value::from(7)));
}

#[rstest]
fn test_build_fails_on_missing_required_field(registry: TypeRegistry) {
    assert_eq!(
        registry.build("Account", Mapping::new()),
        Err(ValidationError::MissingField {
            name: "Account".to_string(),
            field: "user".to_string(),
        })
    );
}

#[rstest]
fn test_build_does_not_default_nested_structs(registry: TypeRegistry) {
    assert_eq!(
        registry.build("Account", mapping(record! { "user" => record! {} })),
        Err(ValidationError::MismatchedField {
            name: "Account".to_string(),
            field: "user".to_string(),
            found: ValueKind::Mapping,
        })
    );
}

#[rstest]
fn test_build_result_validates(registry: TypeRegistry) {
    let built = registry
        .build("Account", mapping(record! { "user" => record! { "name" => "x" } }))
        .unwrap();

    assert_eq!(registry.validate("Account", &Value::from(built)), Ok(true));
}

// =============================================================================
// Schema Literals
// =============================================================================

#[rstest]
fn test_register_from_literal() {
    let literal = record! {
        "age" => sequence![sequence!["string", "int", "float"]],
        "id" => sequence![sequence!["int"], 2],
    };
    let mut registry = TypeRegistry::new();
    registry
        .register("Person", SchemaDefinition::from_value(&literal).unwrap())
        .unwrap();

    let built = registry
        .build("Person", mapping(record! { "age" => "65" }))
        .unwrap();
    assert_eq!(built, mapping(record! { "id" => 2, "age" => "65" }));
}

#[rstest]
fn test_empty_type_list_is_rejected() {
    let mut registry = TypeRegistry::new();
    let result = registry.register(
        "Broken",
        SchemaDefinition::new().field("anything", Vec::<String>::new()),
    );

    assert_eq!(
        result,
        Err(SchemaError::EmptyTypeList {
            name: "Broken".to_string(),
            field: "anything".to_string(),
        })
    );
}
