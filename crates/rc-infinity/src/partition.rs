//! Rigged partitions.
//!
//! A rigged partition is a weakly decreasing list of positive row lengths.
//! Every row carries a rigging and a vacancy number, both exact rationals.

use std::fmt;

use crate::error::{Error, Result};
use crate::options::Convention;
use crate::Rational;

/// Marker printed for a partition with no rows.
pub const EMPTY_PARTITION: &str = "(/)";

/// Most cells a partition may hold, so that sizes, scaled row lengths and
/// vacancy numbers stay within `i64`.
pub const MAX_PARTITION_SIZE: u64 = 1 << 40;

/// One partition of a rigged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiggedPartition {
    rows: Vec<u64>,
    rigging: Vec<Rational>,
    vacancy_numbers: Vec<Rational>,
}

impl RiggedPartition {
    /// Assemble a partition whose shape has already been checked.
    pub(crate) fn from_parts(
        rows: Vec<u64>,
        rigging: Vec<Rational>,
        vacancy_numbers: Vec<Rational>,
    ) -> Self {
        debug_assert_eq!(rows.len(), rigging.len());
        debug_assert_eq!(rows.len(), vacancy_numbers.len());
        Self {
            rows,
            rigging,
            vacancy_numbers,
        }
    }

    /// Row lengths, longest first.
    pub fn rows(&self) -> &[u64] {
        &self.rows
    }

    /// Rigging of each row.
    pub fn rigging(&self) -> &[Rational] {
        &self.rigging
    }

    /// Vacancy number of each row.
    pub fn vacancy_numbers(&self) -> &[Rational] {
        &self.vacancy_numbers
    }

    /// Length of row `i`.
    pub fn row_length(&self, i: usize) -> Option<u64> {
        self.rows.get(i).copied()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of cells.
    pub fn size(&self) -> u64 {
        self.rows.iter().sum()
    }

    /// Number of cells in columns `1..=column`.
    pub fn cells_in_columns_up_to(&self, column: u64) -> u64 {
        cells_in_columns_up_to(&self.rows, column)
    }

    /// Whether every rigging is at most its vacancy number.
    pub fn is_valid(&self) -> bool {
        self.rigging
            .iter()
            .zip(&self.vacancy_numbers)
            .all(|(rig, vac)| rig <= vac)
    }

    /// Iterate over `(row length, rigging, vacancy number)`.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Rational, &Rational)> {
        self.rows
            .iter()
            .zip(&self.rigging)
            .zip(&self.vacancy_numbers)
            .map(|((&row, rig), vac)| (row, rig, vac))
    }

    /// Text lines of this partition, one per row.
    pub(crate) fn lines(&self, convention: Convention) -> Vec<String> {
        if self.is_empty() {
            return vec![EMPTY_PARTITION.to_string()];
        }
        let vac_width = self
            .vacancy_numbers
            .iter()
            .map(|vac| vac.to_string().len())
            .max()
            .unwrap_or(0);
        let mut lines: Vec<String> = self
            .iter()
            .map(|(row, rig, vac)| {
                format!(
                    "{:>width$}{}{}",
                    vac.to_string(),
                    "[ ]".repeat(row as usize),
                    rig,
                    width = vac_width
                )
            })
            .collect();
        if convention == Convention::French {
            lines.reverse();
        }
        lines
    }
}

impl AsRef<[u64]> for RiggedPartition {
    fn as_ref(&self) -> &[u64] {
        &self.rows
    }
}

impl fmt::Display for RiggedPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.lines(Convention::English);
        write!(f, "{}", lines.join("\n"))
    }
}

/// Number of cells of a partition with the given rows lying in columns
/// `1..=column`, i.e. `sum(min(row, column))`.
///
/// Saturates at `u64::MAX`.
pub fn cells_in_columns_up_to(rows: &[u64], column: u64) -> u64 {
    rows.iter()
        .fold(0u64, |cells, &row| cells.saturating_add(row.min(column)))
}

/// Check that `rows` is a partition: positive, weakly decreasing and at most
/// [`MAX_PARTITION_SIZE`] cells.
pub(crate) fn check_rows(node: usize, rows: &[u64]) -> Result<()> {
    if rows.contains(&0) {
        return Err(Error::MalformedElement(format!(
            "partition {} has a row of length zero",
            node
        )));
    }
    if rows.windows(2).any(|pair| pair[0] < pair[1]) {
        return Err(Error::MalformedElement(format!(
            "partition {} is not weakly decreasing: {:?}",
            node, rows
        )));
    }
    let size = rows.iter().try_fold(0u64, |size, &row| size.checked_add(row));
    if !matches!(size, Some(size) if size <= MAX_PARTITION_SIZE) {
        return Err(Error::MalformedElement(format!(
            "partition {} has more than {} cells",
            node, MAX_PARTITION_SIZE
        )));
    }
    Ok(())
}
