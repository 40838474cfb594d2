//! Error types for rc-infinity.

use std::convert::Infallible;

use rc_cartan::{CartanError, CartanType};
use thiserror::Error;

use crate::Rational;

/// Result type for crystal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building crystals or their elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The Cartan type is malformed or has no known folding.
    #[error("invalid Cartan type: {0}")]
    InvalidCartanType(#[from] CartanError),

    /// Partition, rigging or vacancy number data has the wrong shape.
    #[error("malformed element: {0}")]
    MalformedElement(String),

    /// A value is not divisible by its scaling factor, so the element is not
    /// the image of a folded element.
    #[error("{value} is not divisible by scaling factor {factor}")]
    NonExactDivision { value: Rational, factor: u64 },

    /// The element belongs to a different crystal.
    #[error("element of type {actual} given to crystal of type {expected}")]
    ParentMismatch {
        expected: CartanType,
        actual: CartanType,
    },

    /// A virtual crystal operation was requested on a simply-laced crystal.
    #[error("crystal of type {0} is simply-laced and has no virtual crystal")]
    NotFolded(CartanType),
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
