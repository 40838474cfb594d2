//! Property tests for the virtual crystal embedding.
//!
//! # Properties Tested
//!
//! 1. **Round trip**: folding the virtual image recovers the element
//! 2. **Consistency**: the image equals the element the virtual crystal
//!    builds from the same rows and riggings
//! 3. **Validity**: embedding preserves `rigging <= vacancy`
//! 4. **Weight**: the virtual image has the expected number of cells
//! 5. **Integrality**: type `A_{2n}^{(2)}` only holds integer riggings

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;

use rc_infinity::{
    Error, FoldingKind, InfinityCrystal, Rational, RiggedConfiguration, RiggedCrystal, RowValues,
    VirtualCrystal,
};

const FOLDED_TYPES: &[&str] = &[
    "B2", "C2", "C3", "B3", "G2", "F4", "C2~", "B3~", "G2~", "F4~", "A2^2", "A4^2", "A6^2",
];

const A2_EVEN_TYPES: &[&str] = &["A2^2", "A4^2", "A6^2"];

// =============================================================================
// Generators
// =============================================================================

fn arb_rows() -> impl Strategy<Value = Vec<u64>> {
    prop_vec(1u64..=4, 0..=3).prop_map(|mut rows| {
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows
    })
}

/// A folded crystal together with an element whose riggings sit at or below
/// the vacancy numbers.
fn arb_element() -> impl Strategy<Value = (InfinityCrystal, RiggedConfiguration)> {
    prop::sample::select(FOLDED_TYPES).prop_flat_map(|name| {
        let crystal = InfinityCrystal::new(name).unwrap();
        let rank = crystal.cartan_type().rank();
        (
            Just(crystal),
            prop_vec(arb_rows(), rank),
            prop_vec(prop_vec(0i64..=3, 3), rank),
        )
            .prop_map(|(crystal, partitions, offsets)| {
                let base = crystal.element(partitions.clone()).unwrap();
                let riggings: RowValues = base
                    .iter()
                    .zip(&offsets)
                    .map(|(partition, offsets)| {
                        partition
                            .vacancy_numbers()
                            .iter()
                            .zip(offsets)
                            .map(|(&vac, &k)| vac - Rational::from_integer(k))
                            .collect()
                    })
                    .collect();
                let element = crystal
                    .construct_element(partitions, Some(riggings), None)
                    .unwrap();
                (crystal, element)
            })
    })
}

/// An `A_{2n}^{(2)}` crystal, partitions, and riggings `vac - k/2`.
fn arb_half_riggings() -> impl Strategy<Value = (InfinityCrystal, Vec<Vec<u64>>, RowValues)> {
    prop::sample::select(A2_EVEN_TYPES).prop_flat_map(|name| {
        let crystal = InfinityCrystal::new(name).unwrap();
        let rank = crystal.cartan_type().rank();
        (
            Just(crystal),
            prop_vec(arb_rows(), rank),
            prop_vec(prop_vec(0i64..=5, 3), rank),
        )
            .prop_map(|(crystal, partitions, halves)| {
                let base = crystal.element(partitions.clone()).unwrap();
                let riggings: RowValues = base
                    .iter()
                    .zip(&halves)
                    .map(|(partition, halves)| {
                        partition
                            .vacancy_numbers()
                            .iter()
                            .zip(halves)
                            .map(|(&vac, &k)| vac - Rational::new(k, 2))
                            .collect()
                    })
                    .collect();
                (crystal, partitions, riggings)
            })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn folding_recovers_the_element((crystal, element) in arb_element()) {
        let image = crystal.to_virtual(&element).unwrap();
        prop_assert_eq!(crystal.from_virtual(&image).unwrap(), element);
    }

    #[test]
    fn image_agrees_with_the_virtual_crystal((crystal, element) in arb_element()) {
        let image = crystal.to_virtual(&element).unwrap();
        let riggings: RowValues = image.iter().map(|p| p.rigging().to_vec()).collect();
        let direct = crystal
            .virtual_crystal()
            .unwrap()
            .construct_element(image.rows(), Some(riggings), None)
            .unwrap();
        prop_assert_eq!(image, direct);
    }

    #[test]
    fn embedding_preserves_validity((crystal, element) in arb_element()) {
        prop_assert!(element.is_valid());
        let image = crystal.to_virtual(&element).unwrap();
        prop_assert!(image.is_valid());
        prop_assert_eq!(
            image.is_highest_weight_vector(),
            element.is_highest_weight_vector()
        );
    }

    #[test]
    fn image_weight_counts_scaled_cells((crystal, element) in arb_element()) {
        let folding = crystal.as_virtual().unwrap().folding().clone();
        let image = crystal.to_virtual(&element).unwrap();
        let expected: i64 = element
            .iter()
            .enumerate()
            .map(|(a, partition)| {
                let gamma = match folding.kind() {
                    FoldingKind::Generic => folding.scaling_factor(a) as i64,
                    FoldingKind::A2Even => 1,
                };
                partition.size() as i64 * gamma * folding.orbit(a).len() as i64
            })
            .sum();
        prop_assert_eq!(image.weight().height(), expected);
    }

    #[test]
    fn a2_even_elements_always_fold_back((crystal, partitions, riggings) in arb_half_riggings()) {
        let integral = riggings.iter().flatten().all(|value| value.is_integer());
        match crystal.construct_element(partitions, Some(riggings), None) {
            Ok(element) => {
                prop_assert!(integral);
                prop_assert!(element.is_valid());
                let image = crystal.to_virtual(&element).unwrap();
                prop_assert_eq!(crystal.from_virtual(&image).unwrap(), element);
            }
            Err(e) => {
                prop_assert!(!integral);
                prop_assert!(matches!(e, Error::MalformedElement(_)));
            }
        }
    }
}

// =============================================================================
// Fixed Examples
// =============================================================================

#[test]
fn type_c2_example() {
    let c2 = InfinityCrystal::new("C2").unwrap();
    let element = c2.element(vec![vec![3], vec![2]]).unwrap();
    let image = c2.to_virtual(&element).unwrap();
    assert_eq!(image.parent().unwrap(), InfinityCrystal::new("A3").unwrap());
    assert_eq!(image.rows(), vec![vec![3], vec![4], vec![3]]);
    assert_eq!(c2.from_virtual(&image).unwrap(), element);
}

#[test]
fn affine_type_c_folds_into_affine_a() {
    let c2 = InfinityCrystal::new("C2~").unwrap();
    let virt = c2.virtual_crystal().unwrap();
    assert_eq!(virt.cartan_type().to_string(), "['A', 3, 1]");
    let element = c2.element(vec![vec![1], vec![1], vec![1]]).unwrap();
    assert_eq!(element[0].vacancy_numbers(), &[Rational::from_integer(-1)]);
    assert_eq!(element[1].vacancy_numbers(), &[Rational::from_integer(0)]);
    assert_eq!(element[2].vacancy_numbers(), &[Rational::from_integer(-1)]);
    let image = c2.to_virtual(&element).unwrap();
    assert_eq!(image.rows(), vec![vec![2], vec![1], vec![2], vec![1]]);
    assert_eq!(c2.from_virtual(&image).unwrap(), element);
}

#[test]
fn rational_riggings_fold_exactly() {
    let b3 = InfinityCrystal::new("B3").unwrap();
    let half = Rational::new(-1, 2);
    let element = b3
        .construct_element(
            vec![vec![1], vec![], vec![]],
            Some(vec![vec![half], vec![], vec![]]),
            None,
        )
        .unwrap();
    let image = b3.to_virtual(&element).unwrap();
    assert_eq!(image[0].rigging(), &[Rational::from_integer(-1)]);
    assert_eq!(b3.from_virtual(&image).unwrap(), element);
}
