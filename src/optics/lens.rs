//! Lens optics for focusing on part of an immutable structure.
//!
//! A Lens is an optic that provides get/set/modify access to one part of a
//! larger structure. Lenses hold no data of their own, so one lens can be
//! applied to any number of sources, and lenses compose to reach deeply
//! nested parts.
//!
//! Access can fail (a key may be absent), so every operation returns a
//! [`LensResult`].
//!
//! # Laws
//!
//! Whenever the operations succeed, every Lens must satisfy three laws:
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source, lens.get(&source)?)? == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value)?)? == value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1)?, v2)? == lens.set(source, v2)?
//!    ```
//!
//! # Examples
//!
//! ```
//! use shapelens::optics::Lens;
//! use shapelens::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), Ok(10));
//!
//! let updated = x_lens.set(point, 100).unwrap();
//! assert_eq!(updated.x, 100);
//! ```

use std::marker::PhantomData;

use super::error::LensResult;

/// A Lens focuses on a single part within a larger structure.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused part)
///
/// # Laws
///
/// 1. **GetPut Law**: `lens.set(source, lens.get(&source)?)? == source`
/// 2. **PutGet Law**: `lens.get(&lens.set(source, value)?)? == value`
/// 3. **PutPut Law**: `lens.set(lens.set(source, v1)?, v2)? == lens.set(source, v2)?`
pub trait Lens<S, A> {
    /// Gets the focused part.
    ///
    /// # Errors
    ///
    /// Returns a [`LensError`](super::LensError) if the focus is absent.
    fn get(&self, source: &S) -> LensResult<A>;

    /// Sets the focused part to a new value, returning a new source.
    ///
    /// # Errors
    ///
    /// Returns a [`LensError`](super::LensError) if the focus cannot be
    /// written in this source.
    fn set(&self, source: S, value: A) -> LensResult<S>;

    /// Modifies the focused part with a fallible function.
    ///
    /// This is the object-safe form of [`modify`](Self::modify) and the hook
    /// composed lenses use to rebuild every layer on the way back out. The
    /// default gets the current value, applies the function and sets the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `get`, `function` or `set`.
    fn try_modify<'f>(
        &self,
        source: S,
        function: Box<dyn FnOnce(A) -> LensResult<A> + 'f>,
    ) -> LensResult<S> {
        let current = self.get(&source)?;
        let updated = function(current)?;
        self.set(source, updated)
    }

    /// Modifies the focused part by applying a function.
    ///
    /// # Errors
    ///
    /// Returns a [`LensError`](super::LensError) if the focus is absent.
    ///
    /// # Example
    ///
    /// ```
    /// use shapelens::optics::Lens;
    /// use shapelens::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = lens!(Point, x);
    /// let point = Point { x: 10, y: 20 };
    /// let doubled = x_lens.modify(point, |x| x * 2).unwrap();
    /// assert_eq!(doubled.x, 20);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> LensResult<S>
    where
        F: FnOnce(A) -> A,
        Self: Sized,
    {
        self.try_modify(
            source,
            Box::new(move |value: A| -> LensResult<A> { Ok(function(value)) }),
        )
    }

    /// Composes this lens with another lens to focus on a nested part.
    ///
    /// # Example
    ///
    /// ```
    /// use shapelens::optics::Lens;
    /// use shapelens::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Address { street: String, city: String }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Person { name: String, address: Address }
    ///
    /// let person_street = lens!(Person, address).compose(lens!(Address, street));
    ///
    /// let person = Person {
    ///     name: "Alice".to_string(),
    ///     address: Address {
    ///         street: "Main St".to_string(),
    ///         city: "Tokyo".to_string(),
    ///     },
    /// };
    ///
    /// assert_eq!(person_street.get(&person).unwrap(), "Main St");
    /// ```
    fn compose<B, L>(self, other: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, other)
    }
}

impl<S, A, L> Lens<S, A> for &L
where
    L: Lens<S, A> + ?Sized,
{
    fn get(&self, source: &S) -> LensResult<A> {
        (**self).get(source)
    }

    fn set(&self, source: S, value: A) -> LensResult<S> {
        (**self).set(source, value)
    }

    fn try_modify<'f>(
        &self,
        source: S,
        function: Box<dyn FnOnce(A) -> LensResult<A> + 'f>,
    ) -> LensResult<S> {
        (**self).try_modify(source, function)
    }
}

/// A lens implemented using getter and setter functions.
///
/// Use it for computed accessors, e.g. a getter that normalises what it
/// reads and a setter that normalises what it writes. The `lens!` macro
/// generates a `FunctionLens` for plain struct fields.
///
/// # Type Parameters
///
/// - `S`: The source type
/// - `A`: The target type
/// - `G`: The getter function type
/// - `St`: The setter function type
///
/// # Example
///
/// ```
/// use shapelens::optics::{FunctionLens, Lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Height { value: i32, unit: String }
///
/// let unit = FunctionLens::new(
///     |height: &Height| Ok(height.unit.to_uppercase()),
///     |height: Height, unit: String| Ok(Height { unit: unit.to_lowercase(), ..height }),
/// );
///
/// let height = Height { value: 100, unit: "cm".to_string() };
/// assert_eq!(unit.get(&height).unwrap(), "CM");
/// assert_eq!(unit.set(height, "IN".to_string()).unwrap().unit, "in");
/// ```
pub struct FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> LensResult<A>,
    St: Fn(S, A) -> LensResult<S>,
{
    getter: G,
    setter: St,
    _marker: PhantomData<fn(&S, A) -> S>,
}

impl<S, A, G, St> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> LensResult<A>,
    St: Fn(S, A) -> LensResult<S>,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> Lens<S, A> for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> LensResult<A>,
    St: Fn(S, A) -> LensResult<S>,
{
    fn get(&self, source: &S) -> LensResult<A> {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> LensResult<S> {
        (self.setter)(source, value)
    }
}

impl<S, A, G, St> Clone for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> LensResult<A> + Clone,
    St: Fn(S, A) -> LensResult<S> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> std::fmt::Debug for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> LensResult<A>,
    St: Fn(S, A) -> LensResult<S>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// A lens composed of two lenses.
///
/// `set` and `modify` are expressed as "modify the outer focus with a
/// function that sets (or modifies) the inner focus". Every layer on the
/// path is therefore rebuilt as a new value and nothing is updated in
/// place.
///
/// # Type Parameters
///
/// - `L1`: The type of the outer lens
/// - `L2`: The type of the inner lens
/// - `A`: The intermediate type (target of L1, source of L2)
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn(A) -> A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens from an outer and an inner lens.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
{
    fn get(&self, source: &S) -> LensResult<B> {
        let intermediate = self.first.get(source)?;
        self.second.get(&intermediate)
    }

    fn set(&self, source: S, value: B) -> LensResult<S> {
        self.first.try_modify(
            source,
            Box::new(move |intermediate: A| self.second.set(intermediate, value)),
        )
    }

    fn try_modify<'f>(
        &self,
        source: S,
        function: Box<dyn FnOnce(B) -> LensResult<B> + 'f>,
    ) -> LensResult<S> {
        self.first.try_modify(
            source,
            Box::new(move |intermediate: A| self.second.try_modify(intermediate, function)),
        )
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// Creates a lens for a struct field.
///
/// This macro generates a `FunctionLens` that focuses on the specified field
/// of the given struct type. The getter clones the field, so the field type
/// must implement `Clone`. Field access cannot fail.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use shapelens::optics::Lens;
/// use shapelens::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
/// let point = Point { x: 10, y: 20 };
///
/// let updated = x_lens.set(point, 100).unwrap();
/// assert_eq!(updated, Point { x: 100, y: 20 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::std::result::Result::Ok(source.$field.clone()),
            |mut source: $struct_type, value| {
                source.$field = value;
                ::std::result::Result::Ok(source)
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type<$($generic),+>| ::std::result::Result::Ok(source.$field.clone()),
            |mut source: $struct_type<$($generic),+>, value| {
                source.$field = value;
                ::std::result::Result::Ok(source)
            },
        )
    };
    ($struct_type:path, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::std::result::Result::Ok(source.$field.clone()),
            |mut source: $struct_type, value| {
                source.$field = value;
                ::std::result::Result::Ok(source)
            },
        )
    };
}
