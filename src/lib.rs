//! # shapelens
//!
//! Structural type checking and composable lenses for dynamic, JSON-like
//! data.
//!
//! ## Overview
//!
//! Records whose shape is only known at runtime are awkward to work with:
//! nothing checks that a field exists or holds the right kind of value, and
//! updating a nested field means rebuilding every layer by hand. This
//! library provides:
//!
//! - **Values**: [`value::Value`], a JSON-like tree with cheap structural
//!   sharing between versions
//! - **Type Registry**: named struct schemas, recursive validation and
//!   construction with defaults
//! - **Lenses**: reusable get/set/modify accessors that compose into deep
//!   paths and never mutate their source
//!
//! ## Feature Flags
//!
//! - `types`: Struct schemas and the type registry
//! - `optics`: Lenses
//! - `arc`: Share values and registries between threads
//! - `serde`: Conversions between [`value::Value`] and `serde_json`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use shapelens::prelude::*;
//! use shapelens::record;
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .register(
//!         "User",
//!         SchemaDefinition::new()
//!             .field("name", ["string"])
//!             .field_with_default("age", ["int"], 0),
//!     )
//!     .unwrap();
//!
//! let user = registry.build("User", record! { "name" => "mark" }.into_mapping().unwrap()).unwrap();
//! let user = Value::from(user);
//! assert_eq!(registry.validate("User", &user), Ok(true));
//!
//! let age = field("age");
//! let older = age.modify(user, |age| Value::from(age.as_int().unwrap_or(0) + 1)).unwrap();
//! assert_eq!(age.get(&older), Ok(Value::from(1)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use shapelens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::value::*;

    #[cfg(feature = "types")]
    pub use crate::types::*;

    #[cfg(feature = "optics")]
    pub use crate::optics::*;
}

pub mod value;

#[cfg(feature = "types")]
pub mod types;

#[cfg(feature = "optics")]
pub mod optics;
