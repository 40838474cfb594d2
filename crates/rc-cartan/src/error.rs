//! Error types for rc-cartan.

use thiserror::Error;

use crate::CartanType;

/// Result type for Cartan type operations.
pub type Result<T> = std::result::Result<T, CartanError>;

/// Errors raised while describing or folding a Cartan type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartanError {
    /// The letter is not one of A through G.
    #[error("unknown Cartan type letter '{0}'")]
    UnknownLetter(char),

    /// The rank is outside the range the family admits.
    #[error("invalid rank {rank} for type {letter}")]
    InvalidRank { letter: char, rank: usize },

    /// The twist is not supported for this family.
    #[error("unsupported twist {twist} for type {letter}{rank}")]
    UnsupportedTwist { letter: char, rank: usize, twist: u8 },

    /// The textual description could not be parsed.
    #[error("cannot parse Cartan type from {0:?}")]
    Parse(String),

    /// A simply-laced type was asked for a folding.
    #[error("type {0} is simply-laced and has no folding")]
    SimplyLaced(CartanType),

    /// A non-simply-laced type was used where a symmetric Cartan matrix is required.
    #[error("type {0} is not simply-laced")]
    NotSimplyLaced(CartanType),

    /// A node label outside the index set.
    #[error("node {node} is not in the index set of type {cartan_type}")]
    UnknownNode { node: usize, cartan_type: CartanType },
}
