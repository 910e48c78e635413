//! Error type for lens access.

use thiserror::Error;

use crate::value::ValueKind;

/// Why a lens could not reach its focus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LensError {
    /// The focused key is absent from the container.
    #[error("key '{key}' not found")]
    KeyNotFound {
        /// The key, rendered for display.
        key: String,
    },

    /// The focused index is past the end of the sequence.
    #[error("index {index} out of bounds for a sequence of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The sequence length.
        len: usize,
    },

    /// The source is not the kind of container the lens expects.
    #[error("expected a {expected}, found a {found}")]
    NotAContainer {
        /// The container kind the lens works on.
        expected: ValueKind,
        /// The kind actually found.
        found: ValueKind,
    },

    /// `compose_all` was given no lenses.
    #[error("cannot compose an empty list of lenses")]
    EmptyComposition,
}

impl LensError {
    /// Creates a [`LensError::KeyNotFound`] for any displayable key.
    pub fn key_not_found(key: impl std::fmt::Display) -> Self {
        Self::KeyNotFound {
            key: key.to_string(),
        }
    }
}

/// Result of a lens operation.
pub type LensResult<T> = Result<T, LensError>;
