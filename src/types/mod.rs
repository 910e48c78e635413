//! Runtime struct schemas and a structural validator.
//!
//! This module provides a minimal runtime type system for [`Value`]s:
//!
//! - [`TypeRegistry`]: named struct schemas, registered leaves first
//! - [`SchemaDefinition`]: field names to acceptable types and defaults
//! - [`TypeSpec`]: a parsed type name (primitive, `sequence:<T>`, or struct)
//! - [`SharedRegistry`]: a lock-guarded registry with a write-then-freeze lifecycle
//!
//! # Validation Rules
//!
//! - A primitive matches values of exactly its kind; `mixed` matches anything.
//!   There is no coercion: `"1"` is not an `int`.
//! - `sequence:<T>` matches a sequence whose elements all match `<T>`.
//! - A struct matches a mapping that holds every declared field, each
//!   matching at least one of the field's types.
//!
//! # Example
//!
//! ```rust
//! use shapelens::record;
//! use shapelens::types::{SchemaDefinition, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .register(
//!         "User",
//!         SchemaDefinition::new()
//!             .field("name", ["string"])
//!             .field("age", ["string", "int", "float"]),
//!     )
//!     .unwrap();
//!
//! assert_eq!(registry.validate("User", &record! { "name" => "me", "age" => 65 }), Ok(true));
//! assert_eq!(registry.validate("User", &record! { "name" => "me", "age" => false }), Ok(false));
//! assert_eq!(registry.validate("User", &record! { "name" => "me" }), Ok(false));
//! assert!(registry.validate("Admin", &record! {}).is_err());
//! ```
//!
//! [`Value`]: crate::value::Value

mod error;
mod registry;
mod schema;
mod shared;
mod spec;

pub use error::{SchemaError, UnknownTypeError, ValidationError};
pub use registry::TypeRegistry;
pub use schema::{FieldDefinition, FieldSpec, SchemaDefinition, StructSchema};
pub use shared::SharedRegistry;
pub use spec::{Primitive, TypeSpec};
