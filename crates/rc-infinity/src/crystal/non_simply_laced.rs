//! B(∞) in non-simply-laced types, through a virtual crystal.
//!
//! An element of type `X` embeds into the simply-laced virtual type `Y` by
//! copying partition `a` onto every node of its orbit `sigma(a)` and
//! multiplying row lengths, riggings and vacancy numbers by `gamma(a)`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use num_integer::Integer;
use num_traits::Zero;
use rc_cartan::{CartanMatrix, CartanType, Folding};
use tracing::{debug, trace};

use super::{
    collect_slots, describe, divided, empty_element, factor, memoized_virtual, overflow,
    representative, scaled, scaled_rows, RiggedCrystal, RowValues, SimplyLacedCrystal,
    VirtualCrystal,
};
use crate::element::RiggedConfiguration;
use crate::error::{Error, Result};
use crate::vacancy::per_block;
use crate::Rational;

/// Rigged configurations of B(∞) for a folded type other than `A_{2n}^{(2)}`.
#[derive(Debug)]
pub struct NonSimplyLacedCrystal {
    cartan_type: CartanType,
    cartan_matrix: CartanMatrix,
    folding: Folding,
    virtual_crystal: OnceLock<Arc<SimplyLacedCrystal>>,
    module_generators: Vec<RiggedConfiguration>,
}

impl NonSimplyLacedCrystal {
    pub(crate) fn new(folding: Folding) -> Self {
        let cartan_type = folding.cartan_type();
        Self {
            cartan_type,
            cartan_matrix: cartan_type.cartan_matrix(),
            folding,
            virtual_crystal: OnceLock::new(),
            module_generators: vec![empty_element(cartan_type)],
        }
    }

    /// Row lengths of the virtual image of `partitions`.
    fn virtual_rows(&self, partitions: &[Vec<u64>]) -> Result<Vec<Vec<u64>>> {
        if partitions.len() != self.cartan_type.rank() {
            return Err(Error::MalformedElement(format!(
                "type {} needs {} partitions, got {}",
                self.cartan_type,
                self.cartan_type.rank(),
                partitions.len()
            )));
        }
        let virtual_type = self.folding.virtual_type();
        let mut slots: Vec<Option<Vec<u64>>> = vec![None; virtual_type.rank()];
        for (a, rows) in partitions.iter().enumerate() {
            let gamma = self.folding.scaling_factor(a);
            for &node in self.folding.orbit(a) {
                let k = virtual_type.try_position(node)?;
                slots[k] = Some(scaled_rows(rows, gamma)?);
            }
        }
        collect_slots(slots)
    }
}

impl RiggedCrystal for NonSimplyLacedCrystal {
    fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }

    fn cartan_matrix(&self) -> &CartanMatrix {
        &self.cartan_matrix
    }

    fn module_generators(&self) -> &[RiggedConfiguration] {
        &self.module_generators
    }

    /// `p^(a)(L) = p^(sigma(a))(gamma(a) L) / gamma(a)`, read off the virtual
    /// image.
    fn vacancy_numbers(&self, partitions: &[Vec<u64>]) -> Result<RowValues> {
        let virt = self.virtual_crystal()?;
        let virtual_type = self.folding.virtual_type();
        let virtual_rows = self.virtual_rows(partitions)?;
        per_block(partitions, |a, row_len| {
            let gamma = self.folding.scaling_factor(a);
            let k = virtual_type.try_position(representative(&self.folding, a)?)?;
            let column = row_len
                .checked_mul(gamma)
                .ok_or_else(|| overflow(row_len, "times", gamma))?;
            let vac = virt.vacancy_at_column(&virtual_rows, k, column)?;
            trace!(node = a, row_len, gamma, vac, "virtual vacancy number");
            Ok(Rational::from_integer(vac) / factor(gamma))
        })
    }
}

impl VirtualCrystal for NonSimplyLacedCrystal {
    fn folding(&self) -> &Folding {
        &self.folding
    }

    fn virtual_crystal(&self) -> Result<Arc<SimplyLacedCrystal>> {
        memoized_virtual(&self.virtual_crystal, &self.folding)
    }

    fn to_virtual(&self, element: &RiggedConfiguration) -> Result<RiggedConfiguration> {
        self.check_parent(element)?;
        let virt = self.virtual_crystal()?;
        let virtual_type = self.folding.virtual_type();
        let size = virtual_type.rank();
        let mut partitions: Vec<Option<Vec<u64>>> = vec![None; size];
        let mut riggings: Vec<Option<Vec<Rational>>> = vec![None; size];
        let mut vacancy_numbers: Vec<Option<Vec<Rational>>> = vec![None; size];

        for (a, partition) in element.iter().enumerate() {
            let gamma = self.folding.scaling_factor(a);
            for &node in self.folding.orbit(a) {
                let k = virtual_type.try_position(node)?;
                partitions[k] = Some(scaled_rows(partition.rows(), gamma)?);
                riggings[k] = Some(scaled(partition.rigging(), gamma)?);
                vacancy_numbers[k] = Some(scaled(partition.vacancy_numbers(), gamma)?);
            }
        }

        debug!(from = %self.cartan_type, to = %virtual_type, "embedding into virtual crystal");
        virt.construct_element(
            collect_slots(partitions)?,
            Some(collect_slots(riggings)?),
            Some(collect_slots(vacancy_numbers)?),
        )
    }

    fn from_virtual(&self, element: &RiggedConfiguration) -> Result<RiggedConfiguration> {
        let virtual_type = self.folding.virtual_type();
        if element.cartan_type() != virtual_type {
            return Err(Error::ParentMismatch {
                expected: virtual_type,
                actual: element.cartan_type(),
            });
        }

        let rank = self.cartan_type.rank();
        let mut partitions: Vec<Vec<u64>> = Vec::with_capacity(rank);
        let mut riggings: RowValues = Vec::with_capacity(rank);
        let mut vacancy_numbers: RowValues = Vec::with_capacity(rank);
        for a in 0..rank {
            let gamma = self.folding.scaling_factor(a);
            let source = &element[virtual_type.try_position(representative(&self.folding, a)?)?];

            let rows = source
                .rows()
                .iter()
                .map(|&len| {
                    let (quotient, remainder) = len.div_rem(&gamma);
                    if remainder.is_zero() {
                        Ok(quotient)
                    } else {
                        // constructed rows never exceed MAX_PARTITION_SIZE
                        Err(Error::NonExactDivision {
                            value: Rational::from_integer(len as i64),
                            factor: gamma,
                        })
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            partitions.push(rows);
            riggings.push(
                source
                    .rigging()
                    .iter()
                    .map(|&x| divided(x, gamma))
                    .collect::<Result<_>>()?,
            );
            vacancy_numbers.push(
                source
                    .vacancy_numbers()
                    .iter()
                    .map(|&x| divided(x, gamma))
                    .collect::<Result<_>>()?,
            );
        }

        debug!(from = %virtual_type, to = %self.cartan_type, "folding out of virtual crystal");
        self.construct_element(partitions, Some(riggings), Some(vacancy_numbers))
    }
}

impl fmt::Display for NonSimplyLacedCrystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, self.cartan_type)
    }
}
