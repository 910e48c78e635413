//! Type-erased lenses over [`Value`]s.
//!
//! Lenses that operate on records of unknown shape all have the type
//! `Lens<Value, Value>`. [`DynamicLens`] erases their concrete type so they
//! can be stored in lists and maps, composed at runtime and shared between
//! threads.

use std::fmt;
use std::sync::Arc;

use super::error::{LensError, LensResult};
use super::keyed::KeyLens;
use super::lens::{ComposedLens, Lens};
use crate::value::Value;

/// A cheaply clonable, thread-safe `Lens<Value, Value>`.
///
/// # Example
///
/// ```
/// use shapelens::record;
/// use shapelens::optics::{Lens, field};
///
/// let species = field("species");
/// let source = record! { "name" => "mark", "species" => "cat" };
///
/// assert_eq!(species.get(&source).unwrap(), "cat".into());
/// assert_eq!(
///     species.set(source, "dog".into()).unwrap(),
///     record! { "name" => "mark", "species" => "dog" }
/// );
/// ```
#[derive(Clone)]
pub struct DynamicLens {
    inner: Arc<dyn Lens<Value, Value> + Send + Sync>,
    description: Arc<str>,
}

impl DynamicLens {
    /// Wraps any `Lens<Value, Value>`.
    pub fn new<L>(lens: L) -> Self
    where
        L: Lens<Value, Value> + Send + Sync + 'static,
    {
        Self::described(lens, "custom")
    }

    fn described<L>(lens: L, description: impl Into<Arc<str>>) -> Self
    where
        L: Lens<Value, Value> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(lens),
            description: description.into(),
        }
    }

    /// Returns this lens followed by `inner`.
    #[must_use]
    pub fn then(&self, inner: &Self) -> Self {
        let description = format!("{}.{}", self.description, inner.description);
        Self::described(ComposedLens::new(self.clone(), inner.clone()), description)
    }

    /// Returns `true` if both handles share the same underlying lens.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Lens<Value, Value> for DynamicLens {
    fn get(&self, source: &Value) -> LensResult<Value> {
        self.inner.get(source)
    }

    fn set(&self, source: Value, value: Value) -> LensResult<Value> {
        self.inner.set(source, value)
    }

    fn try_modify<'f>(
        &self,
        source: Value,
        function: Box<dyn FnOnce(Value) -> LensResult<Value> + 'f>,
    ) -> LensResult<Value> {
        self.inner.try_modify(source, function)
    }
}

impl fmt::Debug for DynamicLens {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("DynamicLens")
            .field(&self.description)
            .finish()
    }
}

/// Creates a lens focusing on the field `key` of a mapping.
///
/// `get` and `modify` fail with [`LensError::KeyNotFound`] when the field is
/// absent; `set` inserts it. Any of them fails with
/// [`LensError::NotAContainer`] on a value that is not a mapping.
pub fn field(key: impl Into<String>) -> DynamicLens {
    let key = key.into();
    let description = key.clone();
    DynamicLens::described(KeyLens::new(key), description)
}

/// Creates a lens focusing on the element at `index` of a sequence.
pub fn index(index: usize) -> DynamicLens {
    DynamicLens::described(KeyLens::new(index), format!("[{index}]"))
}

/// Composes lenses left to right, outermost first.
///
/// The composite focuses on what `L1` then `L2` ... then `Ln` reach. A single
/// lens is returned unchanged.
///
/// # Errors
///
/// Returns [`LensError::EmptyComposition`] if `lenses` is empty.
///
/// # Example
///
/// ```
/// use shapelens::record;
/// use shapelens::optics::{Lens, compose_all, field};
///
/// let source = record! {
///     "name" => "mark",
///     "body" => record! { "height" => record! { "val" => 100, "unit" => "cm" }, "weight" => 86 },
/// };
/// let height = compose_all([field("body"), field("height"), field("val")]).unwrap();
///
/// assert_eq!(height.get(&source).unwrap(), 100.into());
/// let updated = height.set(source, 110.into()).unwrap();
/// assert_eq!(height.get(&updated).unwrap(), 110.into());
/// ```
pub fn compose_all<I>(lenses: I) -> LensResult<DynamicLens>
where
    I: IntoIterator<Item = DynamicLens>,
{
    let mut lenses = lenses.into_iter();
    let first = lenses.next().ok_or(LensError::EmptyComposition)?;
    Ok(lenses.fold(first, |composite, lens| composite.then(&lens)))
}

/// Composes one field lens per key, reaching the value at a key path.
///
/// # Errors
///
/// Returns [`LensError::EmptyComposition`] if `keys` is empty.
pub fn path<I, K>(keys: I) -> LensResult<DynamicLens>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    compose_all(keys.into_iter().map(field))
}
