//! B(∞) in simply-laced types.

use std::fmt;

use rc_cartan::{CartanError, CartanMatrix, CartanType};
use tracing::trace;

use super::{describe, empty_element, RiggedCrystal, RowValues};
use crate::element::RiggedConfiguration;
use crate::error::Result;
use crate::vacancy::{self, per_block};
use crate::Rational;

/// Rigged configurations of B(∞) for a type with symmetric Cartan matrix.
#[derive(Debug)]
pub struct SimplyLacedCrystal {
    cartan_type: CartanType,
    cartan_matrix: CartanMatrix,
    module_generators: Vec<RiggedConfiguration>,
}

impl SimplyLacedCrystal {
    pub(crate) fn new(cartan_type: CartanType) -> Result<Self> {
        if !cartan_type.is_simply_laced() {
            return Err(CartanError::NotSimplyLaced(cartan_type).into());
        }
        Ok(Self {
            cartan_type,
            cartan_matrix: cartan_type.cartan_matrix(),
            module_generators: vec![empty_element(cartan_type)],
        })
    }

    /// Vacancy number of row `i` of partition `a`.
    pub fn vacancy_number<P: AsRef<[u64]>>(
        &self,
        partitions: &[P],
        a: usize,
        i: usize,
    ) -> Result<Rational> {
        vacancy::vacancy_number(&self.cartan_matrix, partitions, a, i)
    }

    /// Vacancy number of partition `a` at an arbitrary column bound.
    pub(crate) fn vacancy_at_column(
        &self,
        partitions: &[Vec<u64>],
        a: usize,
        column: u64,
    ) -> Result<i64> {
        vacancy::vacancy_at_column(&self.cartan_matrix, partitions, a, column)
    }
}

impl RiggedCrystal for SimplyLacedCrystal {
    fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }

    fn cartan_matrix(&self) -> &CartanMatrix {
        &self.cartan_matrix
    }

    fn module_generators(&self) -> &[RiggedConfiguration] {
        &self.module_generators
    }

    fn vacancy_numbers(&self, partitions: &[Vec<u64>]) -> Result<RowValues> {
        per_block(partitions, |a, row_len| {
            let vac = self.vacancy_at_column(partitions, a, row_len)?;
            trace!(node = a, row_len, vac, "vacancy number");
            Ok(Rational::from_integer(vac))
        })
    }
}

impl fmt::Display for SimplyLacedCrystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, self.cartan_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crystal(name: &str) -> SimplyLacedCrystal {
        SimplyLacedCrystal::new(name.parse().unwrap()).unwrap()
    }

    fn r(value: i64) -> Rational {
        Rational::from_integer(value)
    }

    fn ints(values: &[&[i64]]) -> RowValues {
        values.iter().map(|row| row.iter().copied().map(r).collect()).collect()
    }

    #[test]
    fn rejects_non_simply_laced() {
        assert!(SimplyLacedCrystal::new("B2".parse().unwrap()).is_err());
    }

    #[test]
    fn module_generator_is_empty() {
        let a3 = crystal("A3");
        let generator = a3.highest_weight_vector();
        assert_eq!(a3.module_generators().len(), 1);
        assert_eq!(generator.len(), 3);
        assert!(generator.is_highest_weight_vector());
        assert!(generator.weight().is_zero());
    }

    #[test]
    fn default_riggings_equal_vacancy_numbers() {
        let a2 = crystal("A2");
        let element = a2.element(vec![vec![1], vec![1]]).unwrap();
        for partition in &element {
            assert_eq!(partition.vacancy_numbers(), &[r(-1)]);
            assert_eq!(partition.rigging(), &[r(-1)]);
        }
        assert!(element.is_valid());
    }

    #[test]
    fn explicit_riggings_are_kept() {
        let d4 = crystal("D4");
        let element = d4
            .construct_element(
                vec![vec![1], vec![1, 1], vec![1], vec![1]],
                Some(ints(&[&[0], &[-1, -2], &[0], &[-3]])),
                None,
            )
            .unwrap();
        assert_eq!(element[0].vacancy_numbers(), &[r(0)]);
        assert_eq!(element[1].vacancy_numbers(), &[r(-1), r(-1)]);
        assert_eq!(element[1].rigging(), &[r(-1), r(-2)]);
        assert!(element.is_valid());

        let invalid = d4
            .construct_element(
                vec![vec![1], vec![], vec![], vec![]],
                Some(ints(&[&[5], &[], &[], &[]])),
                None,
            )
            .unwrap();
        assert!(!invalid.is_valid());
    }

    #[test]
    fn vacancy_number_over_elements_and_rows() {
        let a3 = crystal("A3");
        let element = a3.element(vec![vec![2, 2], vec![1], vec![3]]).unwrap();
        assert_eq!(a3.vacancy_number(element.partitions(), 1, 0).unwrap(), r(1));
        assert_eq!(
            a3.vacancy_number(&element.rows(), 1, 0).unwrap(),
            element[1].vacancy_numbers()[0]
        );
    }

    #[test]
    fn affine_type_a_vacancy_numbers() {
        // cycle 0 - 1 - 2 - 3 - 4 - 0
        let a4 = crystal("A4~");
        let element = a4
            .element(vec![vec![2], vec![2, 2], vec![2], vec![2], vec![]])
            .unwrap();
        assert_eq!(element[0].vacancy_numbers(), &[r(0)]);
        assert_eq!(element[1].vacancy_numbers(), &[r(-4), r(-4)]);
        assert_eq!(element[2].vacancy_numbers(), &[r(2)]);
        assert_eq!(element[3].vacancy_numbers(), &[r(-2)]);
        assert_eq!(element[4].vacancy_numbers(), &[]);
    }

    #[test]
    fn vacancy_override_bypasses_computation() {
        let a2 = crystal("A2");
        let element = a2
            .construct_element(vec![vec![1], vec![]], None, Some(ints(&[&[7], &[]])))
            .unwrap();
        assert_eq!(element[0].vacancy_numbers(), &[r(7)]);
        assert_eq!(element[0].rigging(), &[r(7)]);
    }

    #[test]
    fn weight_counts_cells() {
        let e6 = crystal("E6");
        let element = e6
            .element(vec![vec![2, 1], vec![], vec![1], vec![], vec![], vec![4]])
            .unwrap();
        assert_eq!(element.weight().coefficients(), &[3, 0, 1, 0, 0, 4]);
        assert_eq!(
            element.weight().to_string(),
            "3*alpha[1] + alpha[3] + 4*alpha[6]"
        );
    }
}
