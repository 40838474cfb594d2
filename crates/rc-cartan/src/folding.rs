//! Diagram foldings into simply-laced types.
//!
//! A folding of `X` into a simply-laced `Y` maps each node `a` of `X` to an
//! ordered orbit `sigma(a)` of nodes of `Y` and a scaling factor `gamma(a)`.
//! For the generic foldings the Cartan matrix of `X` is recovered as
//! `a_ab = sum over i in sigma(a) of A_Y[i][sigma(b)_0]`.
//!
//! | Type          | Virtual type      |
//! |---------------|-------------------|
//! | `B_n`         | `D_{n+1}`         |
//! | `C_n`         | `A_{2n-1}`        |
//! | `F_4`         | `E_6`             |
//! | `G_2`         | `D_4`             |
//! | `B_n^{(1)}`   | `D_{n+1}^{(1)}`   |
//! | `C_n^{(1)}`   | `A_{2n-1}^{(1)}`  |
//! | `F_4^{(1)}`   | `E_6^{(1)}`       |
//! | `G_2^{(1)}`   | `D_4^{(1)}`       |
//! | `A_{2n}^{(2)}`| `A_{2n-1}^{(1)}`  |
//!
//! Generic foldings scale by `gamma(a) = max |sigma| / |sigma(a)|`.
//! `A_{2n}^{(2)}` scales only its node `n`, by 2.

use crate::error::{CartanError, Result};
use crate::{CartanType, Letter};

/// Which folding protocol a folding follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldingKind {
    /// Orbit scaling of row lengths, riggings and vacancy numbers.
    Generic,
    /// Type `A_{2n}^{(2)}`: row lengths are never scaled.
    A2Even,
}

/// A folding datum: virtual type, orbits and scaling factors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Folding {
    cartan_type: CartanType,
    virtual_type: CartanType,
    orbits: Vec<Vec<usize>>,
    scaling: Vec<u64>,
    kind: FoldingKind,
}

impl Folding {
    /// The folded (non-simply-laced) type.
    pub const fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }

    /// The simply-laced type folded into.
    pub const fn virtual_type(&self) -> CartanType {
        self.virtual_type
    }

    pub const fn kind(&self) -> FoldingKind {
        self.kind
    }

    /// Orbits indexed by position in the folded type's index set; entries
    /// are virtual node labels.
    pub fn orbits(&self) -> &[Vec<usize>] {
        &self.orbits
    }

    /// Orbit of the node at `position`.
    pub fn orbit(&self, position: usize) -> &[usize] {
        &self.orbits[position]
    }

    /// Scaling factors indexed by position in the folded type's index set.
    pub fn scaling_factors(&self) -> &[u64] {
        &self.scaling
    }

    /// Scaling factor of the node at `position`.
    pub fn scaling_factor(&self, position: usize) -> u64 {
        self.scaling[position]
    }

    fn generic(cartan_type: CartanType, virtual_type: CartanType, orbits: Vec<Vec<usize>>) -> Self {
        let widest = orbits.iter().map(Vec::len).max().unwrap_or(1);
        let scaling = orbits.iter().map(|orbit| (widest / orbit.len()) as u64).collect();
        Self {
            cartan_type,
            virtual_type,
            orbits,
            scaling,
            kind: FoldingKind::Generic,
        }
    }
}

impl CartanType {
    /// The folding of this type into a simply-laced one.
    pub fn as_folding(&self) -> Result<Folding> {
        if self.is_simply_laced() {
            return Err(CartanError::SimplyLaced(*self));
        }
        let n = self.n();

        if self.is_a2_even() {
            let m = n / 2;
            let virtual_type = CartanType::affine(Letter::A, 2 * m - 1)?;
            let mut orbits = vec![vec![0]];
            orbits.extend((1..m).map(|i| vec![i, 2 * m - i]));
            orbits.push(vec![m]);
            let mut scaling = vec![1; m + 1];
            scaling[m] = 2;
            return Ok(Folding {
                cartan_type: *self,
                virtual_type,
                orbits,
                scaling,
                kind: FoldingKind::A2Even,
            });
        }

        let (virtual_type, orbits) = match (self.letter(), self.is_affine()) {
            (Letter::B, false) => {
                let mut orbits: Vec<Vec<usize>> = (1..n).map(|i| vec![i]).collect();
                orbits.push(vec![n, n + 1]);
                (CartanType::finite(Letter::D, n + 1)?, orbits)
            }
            (Letter::C, false) => {
                let mut orbits: Vec<Vec<usize>> = (1..n).map(|i| vec![i, 2 * n - i]).collect();
                orbits.push(vec![n]);
                (CartanType::finite(Letter::A, 2 * n - 1)?, orbits)
            }
            (Letter::F, false) => (
                CartanType::finite(Letter::E, 6)?,
                vec![vec![2], vec![4], vec![3, 5], vec![1, 6]],
            ),
            (Letter::G, false) => (
                CartanType::finite(Letter::D, 4)?,
                vec![vec![1, 3, 4], vec![2]],
            ),
            (Letter::B, true) => {
                let mut orbits: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
                orbits.push(vec![n, n + 1]);
                (CartanType::affine(Letter::D, n + 1)?, orbits)
            }
            (Letter::C, true) => {
                let mut orbits = vec![vec![0]];
                orbits.extend((1..n).map(|i| vec![i, 2 * n - i]));
                orbits.push(vec![n]);
                (CartanType::affine(Letter::A, 2 * n - 1)?, orbits)
            }
            (Letter::F, true) => (
                CartanType::affine(Letter::E, 6)?,
                vec![vec![0], vec![2], vec![4], vec![3, 5], vec![1, 6]],
            ),
            (Letter::G, true) => (
                CartanType::affine(Letter::D, 4)?,
                vec![vec![0], vec![1, 3, 4], vec![2]],
            ),
            // simply-laced families returned above
            (Letter::A | Letter::D | Letter::E, _) => {
                return Err(CartanError::SimplyLaced(*self));
            }
        };

        Ok(Folding::generic(*self, virtual_type, orbits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folding(name: &str) -> Folding {
        name.parse::<CartanType>().unwrap().as_folding().unwrap()
    }

    #[test]
    fn type_c_folds_into_a() {
        let c2 = folding("C2");
        assert_eq!(c2.virtual_type().to_string(), "['A', 3]");
        assert_eq!(c2.orbits(), &[vec![1, 3], vec![2]]);
        assert_eq!(c2.scaling_factors(), &[1, 2]);
        assert_eq!(c2.kind(), FoldingKind::Generic);
    }

    #[test]
    fn type_b_folds_into_d() {
        let b3 = folding("B3");
        assert_eq!(b3.virtual_type().to_string(), "['D', 4]");
        assert_eq!(b3.orbits(), &[vec![1], vec![2], vec![3, 4]]);
        assert_eq!(b3.scaling_factors(), &[2, 2, 1]);
    }

    #[test]
    fn type_g_scales_by_three() {
        let g2 = folding("G2");
        assert_eq!(g2.scaling_factors(), &[1, 3]);
        let g2_aff = folding("G2~");
        assert_eq!(g2_aff.scaling_factors(), &[3, 1, 3]);
    }

    #[test]
    fn affine_c_scaling_matches_known_values() {
        let c4 = folding("C4~");
        assert_eq!(c4.virtual_type().to_string(), "['A', 7, 1]");
        assert_eq!(
            c4.orbits(),
            &[vec![0], vec![1, 7], vec![2, 6], vec![3, 5], vec![4]]
        );
        assert_eq!(c4.scaling_factors(), &[2, 1, 1, 1, 2]);

        let c2 = folding("C2~");
        assert_eq!(c2.virtual_type().to_string(), "['A', 3, 1]");
        assert_eq!(c2.scaling_factors(), &[2, 1, 2]);
    }

    #[test]
    fn a2_even_has_its_own_kind() {
        let a4 = folding("A4^2");
        assert_eq!(a4.kind(), FoldingKind::A2Even);
        assert_eq!(a4.virtual_type().to_string(), "['A', 3, 1]");
        assert_eq!(a4.orbits(), &[vec![0], vec![1, 3], vec![2]]);
        assert_eq!(a4.scaling_factors(), &[1, 1, 2]);

        let a2 = folding("A2^2");
        assert_eq!(a2.virtual_type().to_string(), "['A', 1, 1]");
        assert_eq!(a2.orbits(), &[vec![0], vec![1]]);
    }

    #[test]
    fn simply_laced_types_have_no_folding() {
        let a3: CartanType = "A3".parse().unwrap();
        assert_eq!(a3.as_folding(), Err(CartanError::SimplyLaced(a3)));
    }

    #[test]
    fn orbits_partition_the_virtual_index_set() {
        let names = [
            "B2", "B5", "C2", "C5", "F4", "G2", "B3~", "B6~", "C2~", "C5~", "F4~", "G2~", "A2^2",
            "A8^2",
        ];
        for name in names {
            let f = folding(name);
            assert_eq!(f.orbits().len(), f.cartan_type().rank());
            let mut covered: Vec<usize> = f.orbits().iter().flatten().copied().collect();
            covered.sort_unstable();
            assert_eq!(covered, f.virtual_type().index_set(), "orbits of {}", name);
        }
    }

    #[test]
    fn folded_matrix_is_the_cartan_matrix() {
        for name in ["B2", "B4", "C2", "C4", "F4", "G2", "B4~", "C2~", "C3~", "C4~", "F4~", "G2~"] {
            let f = folding(name);
            let ct = f.cartan_type();
            let vt = f.virtual_type();
            let matrix = ct.cartan_matrix();
            let vmatrix = vt.cartan_matrix();
            for a in 0..ct.rank() {
                for b in 0..ct.rank() {
                    let j = vt.position(f.orbit(b)[0]).unwrap();
                    let folded: i64 = f
                        .orbit(a)
                        .iter()
                        .map(|&i| vmatrix.get(vt.position(i).unwrap(), j))
                        .sum();
                    assert_eq!(folded, matrix.get(a, b), "{}: entry ({}, {})", name, a, b);
                }
            }
        }
    }
}
