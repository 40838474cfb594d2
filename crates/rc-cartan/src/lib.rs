//! Cartan Types and Foldings
//!
//! Root-system data consumed by the rigged configuration crystals.
//!
//! # Cartan Types
//!
//! A Cartan type is a letter, a rank parameter and an optional affine twist.
//! Finite types are indexed by `1..=n`, affine types by `0..=n` with the
//! affine node 0 in Kac's labelling. Every description of a type (`"A3"`,
//! `"['A', 3]"`, `('A', 3)`) normalizes to the same [`CartanType`] value.
//!
//! # Cartan Matrices
//!
//! [`CartanMatrix`] follows Kac's convention `a_ij = <α_i^∨, α_j>`. A type is
//! simply-laced exactly when its Cartan matrix is symmetric.
//!
//! # Foldings
//!
//! Every supported non-simply-laced type embeds into a simply-laced one by a
//! diagram folding: each node maps to an orbit of virtual nodes and carries a
//! positive integer scaling factor. Type `A_{2n}^{(2)}` folds with its own
//! convention and is tagged [`FoldingKind::A2Even`].

mod cartan_type;
mod error;
mod folding;
mod matrix;

pub use cartan_type::{CartanType, Letter};
pub use error::{CartanError, Result};
pub use folding::{Folding, FoldingKind};
pub use matrix::CartanMatrix;

/// Diagonal entry of every Cartan matrix.
pub const CARTAN_DIAGONAL: i64 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equivalent_descriptions_normalize() {
        let parsed: CartanType = "A3".parse().unwrap();
        let listed: CartanType = "['A', 3]".parse().unwrap();
        let tupled = CartanType::try_from(('A', 3)).unwrap();
        assert_eq!(parsed, listed);
        assert_eq!(parsed, tupled);
    }

    #[test]
    fn non_simply_laced_types_fold() {
        for name in ["B3", "C2", "F4", "G2", "B3~", "C3~", "F4~", "G2~", "A4^2"] {
            let ct: CartanType = name.parse().unwrap();
            assert!(!ct.is_simply_laced(), "{} should not be simply-laced", ct);
            let folding = ct.as_folding().unwrap();
            assert!(folding.virtual_type().is_simply_laced());
        }
    }
}
