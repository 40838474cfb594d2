//! Rigged configurations: elements of the crystal B(∞).

use std::fmt;
use std::ops::Index;

use rc_cartan::CartanType;

use crate::crystal::InfinityCrystal;
use crate::error::Result;
use crate::options::{DisplayOptions, Layout, HORIZONTAL_GAP};
use crate::partition::RiggedPartition;
use crate::registry;
use crate::weight::RootWeight;

/// A rigged configuration: one rigged partition per node of the index set.
///
/// Elements are immutable. The owning crystal is identified by its Cartan
/// type and looked up in the registry on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiggedConfiguration {
    cartan_type: CartanType,
    partitions: Vec<RiggedPartition>,
}

impl RiggedConfiguration {
    pub(crate) fn new(cartan_type: CartanType, partitions: Vec<RiggedPartition>) -> Self {
        debug_assert_eq!(partitions.len(), cartan_type.rank());
        Self {
            cartan_type,
            partitions,
        }
    }

    /// Cartan type of the owning crystal.
    pub const fn cartan_type(&self) -> CartanType {
        self.cartan_type
    }

    /// The owning crystal.
    pub fn parent(&self) -> Result<InfinityCrystal> {
        registry::crystal_for(self.cartan_type)
    }

    /// Partitions ordered by the index set.
    pub fn partitions(&self) -> &[RiggedPartition] {
        &self.partitions
    }

    /// Partition of the node labelled `node`.
    pub fn partition(&self, node: usize) -> Option<&RiggedPartition> {
        self.cartan_type
            .position(node)
            .map(|position| &self.partitions[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiggedPartition> {
        self.partitions.iter()
    }

    /// Number of partitions (the rank of the Cartan type).
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Row lengths of every partition.
    pub fn rows(&self) -> Vec<Vec<u64>> {
        self.partitions.iter().map(|p| p.rows().to_vec()).collect()
    }

    /// Weight `sum_a |nu^(a)| alpha_a`, where `|nu^(a)|` is the number of
    /// cells of partition `a`.
    pub fn weight(&self) -> RootWeight {
        // sizes are bounded by MAX_PARTITION_SIZE
        let coefficients = self.partitions.iter().map(|p| p.size() as i64).collect();
        RootWeight::from_coefficients(self.cartan_type, coefficients)
    }

    /// Whether every rigging is at most its vacancy number.
    pub fn is_valid(&self) -> bool {
        self.partitions.iter().all(RiggedPartition::is_valid)
    }

    /// Whether every partition is empty.
    pub fn is_highest_weight_vector(&self) -> bool {
        self.partitions.iter().all(RiggedPartition::is_empty)
    }

    /// Render with explicit display options.
    pub fn display(&self, options: DisplayOptions) -> ElementDisplay<'_> {
        ElementDisplay {
            element: self,
            options,
        }
    }
}

impl Index<usize> for RiggedConfiguration {
    type Output = RiggedPartition;

    /// Partition at `position` in the index set.
    fn index(&self, position: usize) -> &RiggedPartition {
        &self.partitions[position]
    }
}

impl<'a> IntoIterator for &'a RiggedConfiguration {
    type Item = &'a RiggedPartition;
    type IntoIter = std::slice::Iter<'a, RiggedPartition>;

    fn into_iter(self) -> Self::IntoIter {
        self.partitions.iter()
    }
}

impl fmt::Display for RiggedConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(DisplayOptions::default()), f)
    }
}

/// A rigged configuration paired with display options.
pub struct ElementDisplay<'a> {
    element: &'a RiggedConfiguration,
    options: DisplayOptions,
}

impl fmt::Display for ElementDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<Vec<String>> = self
            .element
            .iter()
            .map(|p| p.lines(self.options.convention))
            .collect();

        match self.options.layout {
            Layout::Vertical => {
                let text: Vec<String> = blocks.iter().map(|lines| lines.join("\n")).collect();
                write!(f, "{}", text.join("\n\n"))
            }
            Layout::Horizontal => {
                let widths: Vec<usize> = blocks
                    .iter()
                    .map(|lines| lines.iter().map(String::len).max().unwrap_or(0))
                    .collect();
                let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
                let gap = " ".repeat(HORIZONTAL_GAP);
                let lines: Vec<String> = (0..height)
                    .map(|row| {
                        let cells: Vec<String> = blocks
                            .iter()
                            .zip(&widths)
                            .map(|(lines, &width)| {
                                let cell = lines.get(row).map(String::as_str).unwrap_or("");
                                format!("{:<width$}", cell, width = width)
                            })
                            .collect();
                        cells.join(&gap).trim_end().to_string()
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crystal::RiggedCrystal;

    fn sample() -> RiggedConfiguration {
        InfinityCrystal::new("A3")
            .unwrap()
            .element(vec![vec![2, 1], vec![], vec![1]])
            .unwrap()
    }

    #[test]
    fn vertical_display() {
        assert_eq!(
            sample().to_string(),
            "-6[ ][ ]-6\n-4[ ]-4\n\n(/)\n\n-2[ ]-2"
        );
    }

    #[test]
    fn french_display_reverses_rows() {
        let element = sample();
        let options = DisplayOptions::default().french();
        assert_eq!(
            element.display(options).to_string(),
            "-4[ ]-4\n-6[ ][ ]-6\n\n(/)\n\n-2[ ]-2"
        );
    }

    #[test]
    fn horizontal_display() {
        let element = sample();
        let options = DisplayOptions::default().horizontal();
        assert_eq!(
            element.display(options).to_string(),
            "-6[ ][ ]-6   (/)   -2[ ]-2\n-4[ ]-4"
        );
    }

    #[test]
    fn weight_and_lookup() {
        let element = sample();
        assert_eq!(element.weight().to_string(), "3*alpha[1] + alpha[3]");
        assert_eq!(element.partition(1).map(RiggedPartition::len), Some(2));
        assert!(element.partition(0).is_none());
        assert!(element.partition(4).is_none());
        assert_eq!(element.len(), 3);
        assert!(!element.is_highest_weight_vector());
        assert!(element.is_valid());
    }

    #[test]
    fn highest_weight_vector_prints_empty_partitions() {
        let crystal = InfinityCrystal::new("A2~").unwrap();
        let generator = crystal.highest_weight_vector();
        assert_eq!(generator.to_string(), "(/)\n\n(/)\n\n(/)");
        assert_eq!(generator.weight().to_string(), "0");
    }
}
