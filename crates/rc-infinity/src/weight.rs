//! Weights in the root lattice.

use std::fmt;
use std::ops::Neg;

use rc_cartan::CartanType;

use crate::error::{Error, Result};

/// An element `sum_i c_i alpha_i` of the root lattice of a Cartan type.
///
/// Coefficients are stored by position in the index set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootWeight {
    cartan_type: CartanType,
    coefficients: Vec<i64>,
}

impl RootWeight {
    pub fn zero(cartan_type: CartanType) -> Self {
        Self {
            cartan_type,
            coefficients: vec![0; cartan_type.rank()],
        }
    }

    /// The simple root `alpha_node`, or `None` if `node` is not in the index set.
    pub fn simple_root(cartan_type: CartanType, node: usize) -> Option<Self> {
        let position = cartan_type.position(node)?;
        let mut root = Self::zero(cartan_type);
        root.coefficients[position] = 1;
        Some(root)
    }

    /// Build from coefficients indexed by position.
    pub(crate) fn from_coefficients(cartan_type: CartanType, coefficients: Vec<i64>) -> Self {
        debug_assert_eq!(coefficients.len(), cartan_type.rank());
        Self {
            cartan_type,
            coefficients,
        }
    }

    pub const fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }

    /// Coefficients by position in the index set.
    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }

    /// Coefficient of `alpha_node`.
    pub fn coefficient(&self, node: usize) -> Option<i64> {
        self.cartan_type
            .position(node)
            .map(|position| self.coefficients[position])
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0)
    }

    /// Height: the sum of the coefficients.
    pub fn height(&self) -> i64 {
        self.coefficients.iter().sum()
    }

    /// Sum of two weights of the same Cartan type.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        if self.cartan_type != other.cartan_type {
            return Err(Error::ParentMismatch {
                expected: self.cartan_type,
                actual: other.cartan_type,
            });
        }
        let coefficients = self
            .coefficients
            .iter()
            .zip(&other.coefficients)
            .map(|(c, o)| {
                c.checked_add(*o).ok_or_else(|| {
                    Error::MalformedElement(format!("weight coefficient {} + {} overflows", c, o))
                })
            })
            .collect::<Result<_>>()?;
        Ok(Self::from_coefficients(self.cartan_type, coefficients))
    }
}

impl Neg for RootWeight {
    type Output = Self;

    fn neg(mut self) -> Self {
        for c in &mut self.coefficients {
            *c = -*c;
        }
        self
    }
}

impl fmt::Display for RootWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (position, &c) in self.coefficients.iter().enumerate() {
            if c == 0 {
                continue;
            }
            let node = position + self.cartan_type.first_node();
            let sign = match (first, c < 0) {
                (true, true) => "-",
                (true, false) => "",
                (false, true) => " - ",
                (false, false) => " + ",
            };
            match c.unsigned_abs() {
                1 => write!(f, "{}alpha[{}]", sign, node)?,
                abs => write!(f, "{}{}*alpha[{}]", sign, abs, node)?,
            }
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c3() -> CartanType {
        "C3".parse().unwrap()
    }

    #[test]
    fn simple_roots_add() {
        let alpha1 = RootWeight::simple_root(c3(), 1).unwrap();
        let alpha3 = RootWeight::simple_root(c3(), 3).unwrap();
        let sum = alpha1
            .checked_add(&alpha1)
            .and_then(|w| w.checked_add(&alpha3))
            .unwrap();
        assert_eq!(sum.coefficients(), &[2, 0, 1]);
        assert_eq!(sum.coefficient(1), Some(2));
        assert_eq!(sum.coefficient(0), None);
        assert_eq!(sum.height(), 3);
        assert!(RootWeight::simple_root(c3(), 4).is_none());
    }

    #[test]
    fn adding_across_types_is_an_error() {
        let alpha1 = RootWeight::simple_root(c3(), 1).unwrap();
        let b3: CartanType = "B3".parse().unwrap();
        let beta1 = RootWeight::simple_root(b3, 1).unwrap();
        assert_eq!(
            alpha1.checked_add(&beta1),
            Err(Error::ParentMismatch {
                expected: c3(),
                actual: b3
            })
        );

        let big = RootWeight::from_coefficients(c3(), vec![i64::MAX, 0, 0]);
        assert!(matches!(
            big.checked_add(&alpha1),
            Err(Error::MalformedElement(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(RootWeight::zero(c3()).to_string(), "0");
        let w = RootWeight::from_coefficients(c3(), vec![2, 0, 1]);
        assert_eq!(w.to_string(), "2*alpha[1] + alpha[3]");
        assert_eq!((-w).to_string(), "-2*alpha[1] - alpha[3]");

        let affine: CartanType = "A2~".parse().unwrap();
        let w = RootWeight::from_coefficients(affine, vec![1, 0, 3]);
        assert_eq!(w.to_string(), "alpha[0] + 3*alpha[2]");
    }
}
