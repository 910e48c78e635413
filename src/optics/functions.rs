//! Point-free lens helpers.
//!
//! Each helper fixes a lens (and a value or function) and returns a closure
//! waiting for the source, so reads and updates can be passed around before
//! there is any data to apply them to.
//!
//! # Examples
//!
//! ```rust
//! use shapelens::record;
//! use shapelens::optics::{field, over, set, view};
//! use shapelens::value::Value;
//!
//! let source = record! { "name" => "mark", "species" => "cat" };
//! let species = field("species");
//!
//! assert_eq!(view(species.clone())(&source), Ok(Value::from("cat")));
//! assert_eq!(
//!     set(species.clone(), Value::from("dog"))(source.clone()),
//!     Ok(record! { "name" => "mark", "species" => "dog" })
//! );
//!
//! let shout = over(species, |value: Value| {
//!     value.as_str().map_or(value.clone(), |text| text.to_uppercase().into())
//! });
//! assert_eq!(
//!     shout(source),
//!     Ok(record! { "name" => "mark", "species" => "CAT" })
//! );
//! ```

use super::error::LensResult;
use super::lens::Lens;

/// Returns a function reading the focus of `lens`.
pub fn view<S, A, L>(lens: L) -> impl Fn(&S) -> LensResult<A>
where
    L: Lens<S, A>,
{
    move |source: &S| lens.get(source)
}

/// Returns a function replacing the focus of `lens` with `value`.
pub fn set<S, A, L>(lens: L, value: A) -> impl Fn(S) -> LensResult<S>
where
    L: Lens<S, A>,
    A: Clone,
{
    move |source: S| lens.set(source, value.clone())
}

/// Returns a function applying `function` to the focus of `lens`.
pub fn over<S, A, L, F>(lens: L, function: F) -> impl Fn(S) -> LensResult<S>
where
    L: Lens<S, A>,
    F: Fn(A) -> A,
{
    move |source: S| lens.modify(source, &function)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{LensError, field, path};
    use crate::record;
    use crate::value::Value;
    use rstest::rstest;

    #[rstest]
    fn test_set_closure_is_reusable() {
        let rename = set(field("name"), Value::from("ada"));
        assert_eq!(
            rename(record! { "name" => "mark" }),
            Ok(record! { "name" => "ada" })
        );
        assert_eq!(rename(record! {}), Ok(record! { "name" => "ada" }));
    }

    #[rstest]
    fn test_over_composed_lens() {
        let grow = over(path(["body", "height"]).unwrap(), |height: Value| {
            Value::from(height.as_int().unwrap_or_default() + 10)
        });
        let source = record! { "body" => record! { "height" => 100, "weight" => 86 } };
        assert_eq!(
            grow(source),
            Ok(record! { "body" => record! { "height" => 110, "weight" => 86 } })
        );
    }

    #[rstest]
    fn test_over_missing_key_fails() {
        let increment = over(field("count"), |count: Value| count);
        assert_eq!(
            increment(record! {}),
            Err(LensError::key_not_found("count"))
        );
    }
}
