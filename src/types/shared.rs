//! A registry that can be shared between threads.
//!
//! [`SharedRegistry`] follows a write-then-freeze lifecycle: schemas are
//! registered during start-up, then [`SharedRegistry::freeze`] closes the
//! table and every later access is a read. Reads never block each other.
//!
//! With the `arc` feature the registry is `Send + Sync` and can be placed in
//! a `static` or handed to worker threads behind an `Arc`.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use super::error::{SchemaError, UnknownTypeError, ValidationError};
use super::registry::TypeRegistry;
use super::schema::{SchemaDefinition, StructSchema};
use crate::value::{Mapping, Value};

#[derive(Debug, Default)]
struct State {
    registry: TypeRegistry,
    frozen: bool,
}

/// A [`TypeRegistry`] behind a read-write lock, with an explicit freeze.
///
/// # Examples
///
/// ```rust
/// use shapelens::record;
/// use shapelens::types::{SchemaDefinition, SchemaError, SharedRegistry};
///
/// let registry = SharedRegistry::new();
/// registry
///     .register("Point", SchemaDefinition::new().field("x", ["int"]).field("y", ["int"]))
///     .unwrap();
/// registry.freeze();
///
/// assert_eq!(registry.validate("Point", &record! { "x" => 1, "y" => 2 }), Ok(true));
/// assert!(matches!(
///     registry.register("Late", SchemaDefinition::new()),
///     Err(SchemaError::RegistryFrozen { .. })
/// ));
/// ```
#[derive(Debug, Default)]
pub struct SharedRegistry {
    state: RwLock<State>,
}

impl SharedRegistry {
    /// Creates an empty, unfrozen registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a struct schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::RegistryFrozen`] after [`freeze`](Self::freeze),
    /// and otherwise whatever [`TypeRegistry::register`] returns.
    pub fn register(
        &self,
        name: impl Into<String>,
        definition: SchemaDefinition,
    ) -> Result<(), SchemaError> {
        let mut state = self.state.write();
        if state.frozen {
            let name = name.into();
            tracing::warn!(%name, "registration refused: registry is frozen");
            return Err(SchemaError::RegistryFrozen { name });
        }
        state.registry.register(name, definition)
    }

    /// Closes the registry to further registration. Idempotent.
    pub fn freeze(&self) {
        let mut state = self.state.write();
        if !state.frozen {
            state.frozen = true;
            tracing::debug!(structs = state.registry.len(), "registry frozen");
        }
    }

    /// Returns `true` once [`freeze`](Self::freeze) has been called.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.state.read().frozen
    }

    /// Returns a read guard over the underlying registry.
    ///
    /// Registration blocks while the guard is held.
    pub fn read(&self) -> MappedRwLockReadGuard<'_, TypeRegistry> {
        RwLockReadGuard::map(self.state.read(), |state| &state.registry)
    }

    /// Returns a copy of the schema registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<StructSchema> {
        self.read().lookup(name).cloned()
    }

    /// Returns `true` if a struct called `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    /// See [`TypeRegistry::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTypeError`] if `type_name` does not resolve.
    pub fn validate(&self, type_name: &str, value: &Value) -> Result<bool, UnknownTypeError> {
        self.read().validate(type_name, value)
    }

    /// See [`TypeRegistry::build`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] as [`TypeRegistry::build`] does.
    pub fn build(&self, name: &str, overrides: Mapping) -> Result<Mapping, ValidationError> {
        self.read().build(name, overrides)
    }

    /// Consumes the shared registry and returns the plain one.
    #[must_use]
    pub fn into_inner(self) -> TypeRegistry {
        self.state.into_inner().registry
    }
}

impl From<TypeRegistry> for SharedRegistry {
    fn from(registry: TypeRegistry) -> Self {
        Self {
            state: RwLock::new(State {
                registry,
                frozen: false,
            }),
        }
    }
}
