//! Lenses for immutable data manipulation.
//!
//! A lens is a reusable `get`/`set`/`modify` triple focusing on one part of
//! a structure. Lenses hold no data; the same lens can be applied to any
//! number of sources, and every update returns a new source that shares its
//! untouched parts with the old one.
//!
//! # Available Lenses
//!
//! - [`Lens`]: the trait, with [`FunctionLens`] for custom accessors and
//!   [`ComposedLens`] for static composition
//! - [`KeyLens`]: one key of any [`Keyed`] container (mappings, sequences,
//!   [`Value`](crate::value::Value)s, `HashMap`s, `BTreeMap`s)
//! - [`DynamicLens`]: a type-erased `Lens<Value, Value>`, built with
//!   [`field`], [`index`], [`path`] and [`compose_all`]
//! - [`LensMap`]: named batches from [`lenses_for`], crossed with
//!   [`compose_lists`] and [`compose_many`], read with [`view_all`]
//!
//! # Example
//!
//! ```
//! use shapelens::record;
//! use shapelens::optics::{Lens, compose_all, field};
//!
//! let source = record! {
//!     "name" => "mark",
//!     "body" => record! { "height" => 100, "weight" => 86 },
//! };
//! let height = compose_all([field("body"), field("height")]).unwrap();
//!
//! assert_eq!(height.get(&source).unwrap(), 100.into());
//!
//! let grown = height.set(source.clone(), 110.into()).unwrap();
//! assert_eq!(
//!     grown,
//!     record! { "name" => "mark", "body" => record! { "height" => 110, "weight" => 86 } }
//! );
//! // The source is untouched
//! assert_eq!(height.get(&source).unwrap(), 100.into());
//! ```
//!
//! # Missing Keys
//!
//! `get` and `modify` fail with [`LensError::KeyNotFound`] when the focused
//! key is absent. `set` inserts a missing mapping key but fails with
//! [`LensError::IndexOutOfBounds`] past the end of a sequence. A keyed lens
//! applied to a scalar fails with [`LensError::NotAContainer`].
//!
//! # Lens Laws
//!
//! Wherever the focus exists, every lens satisfies:
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
//! Composition is associative for `get`, `set` and `modify`.

mod batch;
mod dynamic;
mod error;
mod functions;
mod keyed;
mod lens;

pub use batch::{LensMap, SEPARATOR, Shape, compose_lists, compose_many, lenses_for, view_all};
pub use dynamic::{DynamicLens, compose_all, field, index, path};
pub use error::{LensError, LensResult};
pub use functions::{over, set, view};
pub use keyed::{KeyLens, Keyed};
pub use lens::{ComposedLens, FunctionLens, Lens};
