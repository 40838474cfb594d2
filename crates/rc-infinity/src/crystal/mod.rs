//! Crystal parents.
//!
//! Three strategies share the [`RiggedCrystal`] capability:
//!
//! - [`SimplyLacedCrystal`] computes vacancy numbers straight from its
//!   symmetric Cartan matrix.
//! - [`NonSimplyLacedCrystal`] folds into a simply-laced virtual crystal,
//!   scaling row lengths, riggings and vacancy numbers by `gamma`.
//! - [`A2EvenCrystal`] folds type `A_{2n}^{(2)}`, scaling only riggings and
//!   vacancy numbers.
//!
//! [`InfinityCrystal`] is the tagged union handed out by the registry.

mod a2_even;
mod non_simply_laced;
mod simply_laced;

pub use a2_even::A2EvenCrystal;
pub use non_simply_laced::NonSimplyLacedCrystal;
pub use simply_laced::SimplyLacedCrystal;

use std::fmt;
use std::sync::{Arc, OnceLock};

use num_traits::{CheckedDiv, CheckedMul};
use rc_cartan::{CartanMatrix, CartanType, Folding, FoldingKind};
use tracing::{debug, trace};

use crate::element::RiggedConfiguration;
use crate::error::{Error, Result};
use crate::partition::{check_rows, RiggedPartition};
use crate::registry;
use crate::Rational;

/// Riggings or vacancy numbers, one list per partition.
pub type RowValues = Vec<Vec<Rational>>;

/// A parent crystal of rigged configurations.
pub trait RiggedCrystal {
    /// Normalized Cartan type.
    fn cartan_type(&self) -> CartanType;

    /// Cartan matrix, cached at construction.
    fn cartan_matrix(&self) -> &CartanMatrix;

    /// The highest weight element, alone.
    fn module_generators(&self) -> &[RiggedConfiguration];

    /// Vacancy numbers of every row of `partitions`.
    ///
    /// `partitions` must already have one partition per node.
    fn vacancy_numbers(&self, partitions: &[Vec<u64>]) -> Result<RowValues>;

    /// Reject riggings or vacancy numbers this crystal cannot hold.
    fn check_values(&self, _what: &str, _values: &RowValues) -> Result<()> {
        Ok(())
    }

    /// Build an element.
    ///
    /// Missing riggings default to the vacancy numbers. Supplied vacancy
    /// numbers replace the computed ones; keeping `rigging <= vacancy` is then
    /// up to the caller.
    fn construct_element(
        &self,
        partitions: Vec<Vec<u64>>,
        riggings: Option<RowValues>,
        vacancy_numbers: Option<RowValues>,
    ) -> Result<RiggedConfiguration> {
        let cartan_type = self.cartan_type();
        if partitions.len() != cartan_type.rank() {
            return Err(Error::MalformedElement(format!(
                "type {} needs {} partitions, got {}",
                cartan_type,
                cartan_type.rank(),
                partitions.len()
            )));
        }
        for (a, rows) in partitions.iter().enumerate() {
            check_rows(a, rows)?;
        }
        if let Some(riggings) = &riggings {
            check_row_values("rigging", riggings, &partitions)?;
            self.check_values("rigging", riggings)?;
        }
        let vacancy_numbers = match vacancy_numbers {
            Some(values) => {
                check_row_values("vacancy number", &values, &partitions)?;
                self.check_values("vacancy number", &values)?;
                values
            }
            None => self.vacancy_numbers(&partitions)?,
        };
        let riggings = riggings.unwrap_or_else(|| vacancy_numbers.clone());

        let partitions = partitions
            .into_iter()
            .zip(riggings)
            .zip(vacancy_numbers)
            .map(|((rows, rigging), vacancy)| RiggedPartition::from_parts(rows, rigging, vacancy))
            .collect();
        trace!(%cartan_type, "constructed rigged configuration");
        Ok(RiggedConfiguration::new(cartan_type, partitions))
    }

    /// Build an element with default riggings.
    fn element(&self, partitions: Vec<Vec<u64>>) -> Result<RiggedConfiguration> {
        self.construct_element(partitions, None, None)
    }

    /// The module generator: every partition empty.
    fn highest_weight_vector(&self) -> &RiggedConfiguration {
        &self.module_generators()[0]
    }

    /// Reject elements owned by another crystal.
    fn check_parent(&self, element: &RiggedConfiguration) -> Result<()> {
        if element.cartan_type() == self.cartan_type() {
            Ok(())
        } else {
            Err(Error::ParentMismatch {
                expected: self.cartan_type(),
                actual: element.cartan_type(),
            })
        }
    }
}

/// A crystal embedded into a simply-laced virtual crystal.
pub trait VirtualCrystal: RiggedCrystal {
    /// The folding datum.
    fn folding(&self) -> &Folding;

    /// The virtual crystal, built on first use.
    fn virtual_crystal(&self) -> Result<Arc<SimplyLacedCrystal>>;

    /// Image of `element` in the virtual crystal.
    fn to_virtual(&self, element: &RiggedConfiguration) -> Result<RiggedConfiguration>;

    /// Preimage of a virtual element.
    fn from_virtual(&self, element: &RiggedConfiguration) -> Result<RiggedConfiguration>;
}

/// The crystal B(∞) of rigged configurations for some Cartan type.
#[derive(Debug, Clone)]
pub enum InfinityCrystal {
    SimplyLaced(Arc<SimplyLacedCrystal>),
    NonSimplyLaced(Arc<NonSimplyLacedCrystal>),
    A2Even(Arc<A2EvenCrystal>),
}

impl InfinityCrystal {
    /// The unique crystal for a Cartan type.
    ///
    /// ```
    /// use rc_cartan::CartanType;
    /// use rc_infinity::InfinityCrystal;
    ///
    /// let a = InfinityCrystal::new("A3").unwrap();
    /// let b = InfinityCrystal::new(('A', 3)).unwrap();
    /// let c = InfinityCrystal::new("A3".parse::<CartanType>().unwrap()).unwrap();
    /// assert!(a.ptr_eq(&b) && b.ptr_eq(&c));
    /// ```
    pub fn new<T>(cartan_type: T) -> Result<Self>
    where
        T: TryInto<CartanType>,
        Error: From<T::Error>,
    {
        registry::crystal_for(cartan_type.try_into()?)
    }

    /// Build a fresh crystal, bypassing the registry.
    pub(crate) fn build(cartan_type: CartanType) -> Result<Self> {
        if cartan_type.is_simply_laced() {
            return Ok(Self::SimplyLaced(Arc::new(SimplyLacedCrystal::new(
                cartan_type,
            )?)));
        }
        let folding = cartan_type.as_folding()?;
        debug!(
            %cartan_type,
            virtual_type = %folding.virtual_type(),
            kind = ?folding.kind(),
            "folding non-simply-laced type"
        );
        Ok(match folding.kind() {
            FoldingKind::Generic => {
                Self::NonSimplyLaced(Arc::new(NonSimplyLacedCrystal::new(folding)))
            }
            FoldingKind::A2Even => Self::A2Even(Arc::new(A2EvenCrystal::new(folding))),
        })
    }

    /// Whether both handles point at the same crystal.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SimplyLaced(a), Self::SimplyLaced(b)) => Arc::ptr_eq(a, b),
            (Self::NonSimplyLaced(a), Self::NonSimplyLaced(b)) => Arc::ptr_eq(a, b),
            (Self::A2Even(a), Self::A2Even(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Short name of the strategy, for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SimplyLaced(_) => "simply-laced",
            Self::NonSimplyLaced(_) => "non-simply-laced",
            Self::A2Even(_) => "A2-even",
        }
    }

    pub fn as_simply_laced(&self) -> Option<&Arc<SimplyLacedCrystal>> {
        match self {
            Self::SimplyLaced(crystal) => Some(crystal),
            _ => None,
        }
    }

    /// The folding capability, `None` for simply-laced crystals.
    pub fn as_virtual(&self) -> Option<&dyn VirtualCrystal> {
        match self {
            Self::SimplyLaced(_) => None,
            Self::NonSimplyLaced(crystal) => Some(&**crystal),
            Self::A2Even(crystal) => Some(&**crystal),
        }
    }

    fn folded(&self) -> Result<&dyn VirtualCrystal> {
        self.as_virtual().ok_or(Error::NotFolded(self.cartan_type()))
    }

    /// See [`VirtualCrystal::virtual_crystal`].
    pub fn virtual_crystal(&self) -> Result<Arc<SimplyLacedCrystal>> {
        self.folded()?.virtual_crystal()
    }

    /// See [`VirtualCrystal::to_virtual`].
    pub fn to_virtual(&self, element: &RiggedConfiguration) -> Result<RiggedConfiguration> {
        self.folded()?.to_virtual(element)
    }

    /// See [`VirtualCrystal::from_virtual`].
    pub fn from_virtual(&self, element: &RiggedConfiguration) -> Result<RiggedConfiguration> {
        self.folded()?.from_virtual(element)
    }

    fn inner(&self) -> &dyn RiggedCrystal {
        match self {
            Self::SimplyLaced(crystal) => &**crystal,
            Self::NonSimplyLaced(crystal) => &**crystal,
            Self::A2Even(crystal) => &**crystal,
        }
    }
}

impl RiggedCrystal for InfinityCrystal {
    fn cartan_type(&self) -> CartanType {
        self.inner().cartan_type()
    }

    fn cartan_matrix(&self) -> &CartanMatrix {
        self.inner().cartan_matrix()
    }

    fn module_generators(&self) -> &[RiggedConfiguration] {
        self.inner().module_generators()
    }

    fn vacancy_numbers(&self, partitions: &[Vec<u64>]) -> Result<RowValues> {
        self.inner().vacancy_numbers(partitions)
    }

    fn check_values(&self, what: &str, values: &RowValues) -> Result<()> {
        self.inner().check_values(what, values)
    }

    fn construct_element(
        &self,
        partitions: Vec<Vec<u64>>,
        riggings: Option<RowValues>,
        vacancy_numbers: Option<RowValues>,
    ) -> Result<RiggedConfiguration> {
        self.inner()
            .construct_element(partitions, riggings, vacancy_numbers)
    }
}

impl PartialEq for InfinityCrystal {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for InfinityCrystal {}

impl fmt::Display for InfinityCrystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimplyLaced(crystal) => fmt::Display::fmt(&**crystal, f),
            Self::NonSimplyLaced(crystal) => fmt::Display::fmt(&**crystal, f),
            Self::A2Even(crystal) => fmt::Display::fmt(&**crystal, f),
        }
    }
}

/// Name shared by every crystal's `Display`.
fn describe(f: &mut fmt::Formatter<'_>, cartan_type: CartanType) -> fmt::Result {
    write!(
        f,
        "The infinity crystal of rigged configurations of type {}",
        cartan_type
    )
}

/// The element with every partition empty.
fn empty_element(cartan_type: CartanType) -> RiggedConfiguration {
    RiggedConfiguration::new(
        cartan_type,
        vec![RiggedPartition::default(); cartan_type.rank()],
    )
}

/// Fetch the virtual crystal through the registry once and keep it.
fn memoized_virtual(
    slot: &OnceLock<Arc<SimplyLacedCrystal>>,
    folding: &Folding,
) -> Result<Arc<SimplyLacedCrystal>> {
    if let Some(crystal) = slot.get() {
        return Ok(Arc::clone(crystal));
    }
    let crystal = registry::simply_laced(folding.virtual_type())?;
    debug!(
        cartan_type = %folding.cartan_type(),
        virtual_type = %folding.virtual_type(),
        "virtual crystal attached"
    );
    Ok(Arc::clone(slot.get_or_init(|| crystal)))
}

/// First virtual node of the orbit of the node at `position`.
fn representative(folding: &Folding, position: usize) -> Result<usize> {
    folding.orbit(position).first().copied().ok_or_else(|| {
        Error::MalformedElement(format!("empty orbit for node at position {}", position))
    })
}

fn factor(gamma: u64) -> Rational {
    Rational::from_integer(gamma as i64)
}

fn overflow(value: impl fmt::Display, op: &str, gamma: u64) -> Error {
    Error::MalformedElement(format!("{} {} {} overflows", value, op, gamma))
}

/// Riggings or vacancy numbers times `gamma`.
fn scaled(values: &[Rational], gamma: u64) -> Result<Vec<Rational>> {
    values
        .iter()
        .map(|value| {
            value
                .checked_mul(&factor(gamma))
                .ok_or_else(|| overflow(value, "times", gamma))
        })
        .collect()
}

/// `value / gamma`.
fn divided(value: Rational, gamma: u64) -> Result<Rational> {
    value
        .checked_div(&factor(gamma))
        .ok_or_else(|| overflow(value, "over", gamma))
}

/// Row lengths times `gamma`.
fn scaled_rows(rows: &[u64], gamma: u64) -> Result<Vec<u64>> {
    rows.iter()
        .map(|&len| len.checked_mul(gamma).ok_or_else(|| overflow(len, "times", gamma)))
        .collect()
}

/// Unwrap per-node slots filled from orbits.
fn collect_slots<T>(slots: Vec<Option<T>>) -> Result<Vec<T>> {
    slots
        .into_iter()
        .enumerate()
        .map(|(k, slot)| {
            slot.ok_or_else(|| {
                Error::MalformedElement(format!(
                    "virtual position {} is not covered by any orbit",
                    k
                ))
            })
        })
        .collect()
}

fn check_row_values(what: &str, values: &RowValues, partitions: &[Vec<u64>]) -> Result<()> {
    if values.len() != partitions.len() {
        return Err(Error::MalformedElement(format!(
            "expected {} {} lists, got {}",
            partitions.len(),
            what,
            values.len()
        )));
    }
    for (a, (list, rows)) in values.iter().zip(partitions).enumerate() {
        if list.len() != rows.len() {
            return Err(Error::MalformedElement(format!(
                "partition {} has {} rows but {} {} values",
                a,
                rows.len(),
                list.len(),
                what
            )));
        }
    }
    Ok(())
}
