//! Rigged Configurations for B(∞)
//!
//! The crystal B(∞) of a Kac-Moody algebra modeled by rigged configurations:
//! tuples of partitions, one per Dynkin node, whose rows carry a rigging and
//! a vacancy number.
//!
//! # Vacancy Numbers
//!
//! In a simply-laced type the vacancy number of a row of length `L` in
//! partition `a` is `-sum_b A[a][b] Q_L^(b)`, read straight off the Cartan
//! matrix. See [`vacancy_number`].
//!
//! # Virtual Crystals
//!
//! Non-simply-laced types fold into a simply-laced virtual type. Elements
//! embed by copying each partition onto its orbit and scaling by `gamma`;
//! vacancy numbers are read back from that embedding, so the image of an
//! element agrees with what the virtual crystal computes for the same
//! partitions. Type `A_{2n}^{(2)}` never scales row lengths.
//!
//! # Uniqueness
//!
//! Crystals are created through a process-wide registry. Any spelling of a
//! Cartan type yields the same [`InfinityCrystal`], and crystals compare by
//! identity.
//!
//! ```
//! use rc_infinity::{InfinityCrystal, RiggedCrystal};
//!
//! let c2 = InfinityCrystal::new("C2").unwrap();
//! let element = c2.element(vec![vec![3], vec![2]]).unwrap();
//! let image = c2.to_virtual(&element).unwrap();
//! assert_eq!(image.rows(), vec![vec![3], vec![4], vec![3]]);
//! assert_eq!(c2.from_virtual(&image).unwrap(), element);
//! ```

mod crystal;
mod element;
mod error;
mod options;
mod partition;
mod registry;
mod vacancy;
mod weight;

pub use crystal::{
    A2EvenCrystal, InfinityCrystal, NonSimplyLacedCrystal, RiggedCrystal, RowValues,
    SimplyLacedCrystal, VirtualCrystal,
};
pub use element::{ElementDisplay, RiggedConfiguration};
pub use error::{Error, Result};
pub use options::{Convention, DisplayOptions, Layout};
pub use partition::{
    cells_in_columns_up_to, RiggedPartition, EMPTY_PARTITION, MAX_PARTITION_SIZE,
};
pub use registry::{clear_registry, crystal_for, registered_types};
pub use vacancy::{vacancy_at_column, vacancy_number};
pub use weight::RootWeight;

pub use rc_cartan::{CartanMatrix, CartanType, Folding, FoldingKind};

/// Exact rational used for riggings and vacancy numbers.
pub type Rational = num_rational::Ratio<i64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_parent_is_the_registered_crystal() {
        let crystal = InfinityCrystal::new("F4").unwrap();
        let element = crystal.element(vec![vec![1], vec![], vec![], vec![]]).unwrap();
        assert!(element.parent().unwrap().ptr_eq(&crystal));
        assert!(crystal.check_parent(&element).is_ok());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn public_types_are_send_and_sync() {
        assert_send_sync::<InfinityCrystal>();
        assert_send_sync::<RiggedConfiguration>();
        assert_send_sync::<RootWeight>();
        assert_send_sync::<Error>();
    }

    #[test]
    fn parents_compare_by_identity() {
        let b3 = InfinityCrystal::new("B3").unwrap();
        let c3 = InfinityCrystal::new("C3").unwrap();
        assert_eq!(b3, InfinityCrystal::new(('B', 3)).unwrap());
        assert_ne!(b3, c3);
    }
}
