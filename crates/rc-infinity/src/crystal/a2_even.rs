//! B(∞) in type `A_{2n}^{(2)}`.
//!
//! The virtual crystal is `A_{2n-1}^{(1)}`. Row lengths are copied onto the
//! orbit unchanged; only riggings and vacancy numbers of node `n` are doubled.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rc_cartan::{CartanMatrix, CartanType, Folding};
use tracing::{debug, trace};

use super::{
    collect_slots, describe, divided, empty_element, factor, memoized_virtual, representative,
    scaled, RiggedCrystal, RowValues, SimplyLacedCrystal, VirtualCrystal,
};
use crate::element::RiggedConfiguration;
use crate::error::{Error, Result};
use crate::vacancy::per_block;
use crate::Rational;

#[derive(Debug)]
pub struct A2EvenCrystal {
    cartan_type: CartanType,
    cartan_matrix: CartanMatrix,
    folding: Folding,
    virtual_crystal: OnceLock<Arc<SimplyLacedCrystal>>,
    module_generators: Vec<RiggedConfiguration>,
}

impl A2EvenCrystal {
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

    /// Virtual position the node at `position` is read from.
    fn source(&self, position: usize) -> Result<usize> {
        let node = representative(&self.folding, position)?;
        Ok(self.folding.virtual_type().try_position(node)?)
    }

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
            for &node in self.folding.orbit(a) {
                slots[virtual_type.try_position(node)?] = Some(rows.clone());
            }
        }
        collect_slots(slots)
    }
}

/// `value / gamma`, which must be an integer.
fn divide_exactly(value: Rational, gamma: u64) -> Result<Rational> {
    let quotient = divided(value, gamma)?;
    if quotient.is_integer() {
        Ok(quotient)
    } else {
        Err(Error::NonExactDivision {
            value,
            factor: gamma,
        })
    }
}

impl RiggedCrystal for A2EvenCrystal {
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
        let virt = self.virtual_crystal()?;
        let virtual_rows = self.virtual_rows(partitions)?;
        per_block(partitions, |a, row_len| {
            let gamma = self.folding.scaling_factor(a);
            let vac = virt.vacancy_at_column(&virtual_rows, self.source(a)?, row_len)?;
            trace!(node = a, row_len, gamma, vac, "virtual vacancy number");
            Ok(Rational::from_integer(vac) / factor(gamma))
        })
    }

    /// Riggings and vacancy numbers are integers; folding back divides by
    /// `gamma` and only integer quotients lie in the image.
    fn check_values(&self, what: &str, values: &RowValues) -> Result<()> {
        let first = self.cartan_type.first_node();
        for (a, list) in values.iter().enumerate() {
            if let Some(value) = list.iter().find(|value| !value.is_integer()) {
                return Err(Error::MalformedElement(format!(
                    "{} {} at node {} is not an integer",
                    what,
                    value,
                    a + first
                )));
            }
        }
        Ok(())
    }
}

impl VirtualCrystal for A2EvenCrystal {
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
                partitions[k] = Some(partition.rows().to_vec());
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
            let source = &element[self.source(a)?];
            partitions.push(source.rows().to_vec());
            riggings.push(
                source
                    .rigging()
                    .iter()
                    .map(|&x| divide_exactly(x, gamma))
                    .collect::<Result<_>>()?,
            );
            vacancy_numbers.push(
                source
                    .vacancy_numbers()
                    .iter()
                    .map(|&x| divide_exactly(x, gamma))
                    .collect::<Result<_>>()?,
            );
        }

        debug!(from = %virtual_type, to = %self.cartan_type, "folding out of virtual crystal");
        self.construct_element(partitions, Some(riggings), Some(vacancy_numbers))
    }
}

impl fmt::Display for A2EvenCrystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, self.cartan_type)
    }
}
