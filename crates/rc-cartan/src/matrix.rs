//! Cartan matrices built from Dynkin diagram bonds.
//!
//! Entries follow Kac: `a_ij = <α_i^∨, α_j>`. For a double bond between a
//! long node `i` and a short node `j`, `a_ij = -1` and `a_ji = -2`.

use std::fmt;

use crate::{CartanType, Letter, CARTAN_DIAGONAL};

/// A square integer Cartan matrix indexed by index-set positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartanMatrix {
    rank: usize,
    entries: Vec<i64>,
}

impl CartanMatrix {
    /// A matrix with 2 on the diagonal and no bonds.
    pub fn diagonal(rank: usize) -> Self {
        let mut entries = vec![0; rank * rank];
        for a in 0..rank {
            entries[a * rank + a] = CARTAN_DIAGONAL;
        }
        Self { rank, entries }
    }

    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Entry `a_{ab}`.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> i64 {
        self.entries[a * self.rank + b]
    }

    /// Row `a` of the matrix.
    pub fn row(&self, a: usize) -> &[i64] {
        &self.entries[a * self.rank..(a + 1) * self.rank]
    }

    /// Nonzero entries of row `a` as `(b, a_{ab})`.
    pub fn nonzero_in_row(&self, a: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.row(a)
            .iter()
            .enumerate()
            .filter(|(_, &value)| value != 0)
            .map(|(b, &value)| (b, value))
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.rank).all(|a| (0..a).all(|b| self.get(a, b) == self.get(b, a)))
    }

    /// Simple bond between positions `a` and `b`.
    fn bond(&mut self, a: usize, b: usize) {
        self.set_bond(a, b, -1, -1);
    }

    fn set_bond(&mut self, a: usize, b: usize, ab: i64, ba: i64) {
        self.entries[a * self.rank + b] = ab;
        self.entries[b * self.rank + a] = ba;
    }
}

impl fmt::Display for CartanMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in 0..self.rank {
            let row: Vec<String> = self.row(a).iter().map(|v| format!("{:>2}", v)).collect();
            writeln!(f, "[{}]", row.join(" "))?;
        }
        Ok(())
    }
}

/// Builder addressing nodes by label instead of position.
struct Diagram {
    first: usize,
    matrix: CartanMatrix,
}

impl Diagram {
    fn new(ct: &CartanType) -> Self {
        Self {
            first: ct.first_node(),
            matrix: CartanMatrix::diagonal(ct.rank()),
        }
    }

    fn bond(&mut self, i: usize, j: usize) {
        self.matrix.bond(i - self.first, j - self.first);
    }

    /// Chain of simple bonds `from - from+1 - ... - to`.
    fn chain(&mut self, from: usize, to: usize) {
        for i in from..to {
            self.bond(i, i + 1);
        }
    }

    /// Multiple bond: `a_ij = ij`, `a_ji = ji`.
    fn multi(&mut self, i: usize, j: usize, ij: i64, ji: i64) {
        self.matrix.set_bond(i - self.first, j - self.first, ij, ji);
    }

    /// Bonds of the finite diagram of `letter` with rank `n`.
    fn finite(&mut self, letter: Letter, n: usize) {
        match letter {
            Letter::A => self.chain(1, n),
            Letter::B => {
                self.chain(1, n - 1);
                self.multi(n - 1, n, -1, -2);
            }
            Letter::C => {
                self.chain(1, n - 1);
                self.multi(n - 1, n, -2, -1);
            }
            Letter::D => {
                self.chain(1, n - 1);
                self.bond(n - 2, n);
            }
            Letter::E => {
                self.bond(1, 3);
                self.chain(3, n);
                self.bond(2, 4);
            }
            Letter::F => {
                self.bond(1, 2);
                self.multi(2, 3, -1, -2);
                self.bond(3, 4);
            }
            Letter::G => self.multi(1, 2, -3, -1),
        }
    }
}

pub(crate) fn for_type(ct: &CartanType) -> CartanMatrix {
    let mut diagram = Diagram::new(ct);
    let n = ct.n();

    match ct.twist() {
        None => diagram.finite(ct.letter(), n),
        Some(1) => {
            diagram.finite(ct.letter(), n);
            match ct.letter() {
                Letter::A if n == 1 => diagram.multi(0, 1, -2, -2),
                Letter::A => {
                    diagram.bond(0, 1);
                    diagram.bond(0, n);
                }
                Letter::B | Letter::D => diagram.bond(0, 2),
                Letter::C => diagram.multi(0, 1, -1, -2),
                Letter::E => match n {
                    6 => diagram.bond(0, 2),
                    7 => diagram.bond(0, 1),
                    _ => diagram.bond(0, 8),
                },
                Letter::F => diagram.bond(0, 1),
                Letter::G => diagram.bond(0, 2),
            }
        }
        // A_{2m}^{(2)}: 0 <= 1 - ... - (m-1) <= m
        Some(_) => {
            let m = n / 2;
            if m == 1 {
                diagram.multi(0, 1, -4, -1);
            } else {
                diagram.multi(0, 1, -2, -1);
                diagram.chain(1, m - 1);
                diagram.multi(m - 1, m, -2, -1);
            }
        }
    }

    diagram.matrix
}
