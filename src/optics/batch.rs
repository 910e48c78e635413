//! Named batches of lenses.
//!
//! A [`LensMap`] holds one [`DynamicLens`] per field name. Batches are derived
//! from a record shape with [`lenses_for`], crossed with each other to reach
//! nested fields with [`compose_lists`] and [`compose_many`], and read all at
//! once with [`view_all`].

use std::collections::BTreeMap;

use super::dynamic::{DynamicLens, field};
use super::error::LensResult;
use super::lens::Lens;
use crate::value::{Mapping, Value};

/// Lenses keyed by the name of the field they reach.
pub type LensMap = BTreeMap<String, DynamicLens>;

/// Joins the names of an outer and an inner lens in composed batches.
pub const SEPARATOR: &str = "_";

/// Something that lists the field names of a record.
pub trait Shape {
    /// Returns the field names, in declaration order.
    fn field_names(&self) -> Vec<String>;
}

impl Shape for Mapping {
    fn field_names(&self) -> Vec<String> {
        self.keys().map(str::to_string).collect()
    }
}

#[cfg(feature = "types")]
impl Shape for crate::types::StructSchema {
    fn field_names(&self) -> Vec<String> {
        self.fields()
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }
}

impl<T: AsRef<str>> Shape for [T] {
    fn field_names(&self) -> Vec<String> {
        self.iter().map(|name| name.as_ref().to_string()).collect()
    }
}

impl<T: AsRef<str>> Shape for Vec<T> {
    fn field_names(&self) -> Vec<String> {
        self.as_slice().field_names()
    }
}

impl<T: AsRef<str>, const N: usize> Shape for [T; N] {
    fn field_names(&self) -> Vec<String> {
        self.as_slice().field_names()
    }
}

/// Creates one field lens per field of `shape`.
///
/// Duplicate names collapse into a single entry.
///
/// # Example
///
/// ```
/// use shapelens::record;
/// use shapelens::optics::{Lens, lenses_for};
///
/// let lenses = lenses_for(&["k1", "k2"]);
/// let source = record! { "k1" => "dog", "k2" => 5 };
///
/// assert_eq!(lenses["k2"].get(&source).unwrap(), 5.into());
/// ```
pub fn lenses_for<S>(shape: &S) -> LensMap
where
    S: Shape + ?Sized,
{
    shape
        .field_names()
        .into_iter()
        .map(|name| {
            let lens = field(name.as_str());
            (name, lens)
        })
        .collect()
}

/// Composes every lens of `outer` with every lens of `inner`.
///
/// The composite of `outer[a]` and `inner[b]` is stored under `a_b`. Pairs
/// that do not describe a real path in the data still produce a lens; using
/// it fails at access time.
pub fn compose_lists(outer: &LensMap, inner: &LensMap) -> LensMap {
    outer
        .iter()
        .flat_map(|(prefix, outer_lens)| {
            inner.iter().map(move |(name, inner_lens)| {
                (
                    format!("{prefix}{SEPARATOR}{name}"),
                    outer_lens.then(inner_lens),
                )
            })
        })
        .collect()
}

/// Crosses a list of batches, outermost first.
///
/// `compose_many([a, b, c])` holds one lens per choice of a lens from each
/// batch, named `a_b_c`. A single batch is returned as is and no batches
/// give an empty map.
///
/// # Example
///
/// ```
/// use shapelens::record;
/// use shapelens::optics::{Lens, compose_many, lenses_for};
///
/// let deep = compose_many(vec![lenses_for(&["body"]), lenses_for(&["height", "weight"])]);
/// let source = record! { "body" => record! { "height" => 180, "weight" => 75 } };
///
/// assert_eq!(deep.len(), 2);
/// assert_eq!(deep["body_weight"].get(&source).unwrap(), 75.into());
/// ```
pub fn compose_many<I>(lists: I) -> LensMap
where
    I: IntoIterator<Item = LensMap>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut lists = lists.into_iter().rev();
    let Some(innermost) = lists.next() else {
        return LensMap::new();
    };
    lists.fold(innermost, |inner, outer| compose_lists(&outer, &inner))
}

/// Returns a function reading every lens of `lenses` from one source.
///
/// The result maps each lens name to the value it focuses on. The first lens
/// that fails aborts the whole read.
pub fn view_all(lenses: LensMap) -> impl Fn(&Value) -> LensResult<Mapping> {
    move |source: &Value| {
        lenses
            .iter()
            .map(|(name, lens)| Ok((name.clone(), lens.get(source)?)))
            .collect()
    }
}
