//! Vacancy numbers.
//!
//! For row `i` of partition `a` with length `L`:
//!
//! ```text
//! p_i^(a) = - sum_b A[a][b] * Q_L^(b)
//! ```
//!
//! where `Q_L^(b)` counts the cells of partition `b` in columns `1..=L`.

use rc_cartan::CartanMatrix;

use crate::error::{Error, Result};
use crate::partition::cells_in_columns_up_to;
use crate::Rational;

/// Vacancy number of row `i` of partition `a`.
///
/// # Examples
///
/// ```
/// use rc_cartan::CartanType;
/// use rc_infinity::{vacancy_number, Rational};
///
/// let a2: CartanType = "A2".parse().unwrap();
/// let partitions: [Vec<u64>; 2] = [vec![1], vec![1]];
/// let vac = vacancy_number(&a2.cartan_matrix(), &partitions, 0, 0).unwrap();
/// assert_eq!(vac, Rational::from_integer(-1));
/// ```
pub fn vacancy_number<P: AsRef<[u64]>>(
    matrix: &CartanMatrix,
    partitions: &[P],
    a: usize,
    i: usize,
) -> Result<Rational> {
    if partitions.len() != matrix.rank() {
        return Err(Error::MalformedElement(format!(
            "expected {} partitions, got {}",
            matrix.rank(),
            partitions.len()
        )));
    }
    let row_len = partitions
        .get(a)
        .and_then(|rows| rows.as_ref().get(i))
        .copied()
        .ok_or_else(|| Error::MalformedElement(format!("no row {} in partition {}", i, a)))?;
    vacancy_at_column(matrix, partitions, a, row_len).map(Rational::from_integer)
}

/// Vacancy number of partition `a` evaluated at an arbitrary column bound.
///
/// `partitions` must have one entry per row of `matrix`. Fails when the cell
/// counts do not fit in `i64`.
pub fn vacancy_at_column<P: AsRef<[u64]>>(
    matrix: &CartanMatrix,
    partitions: &[P],
    a: usize,
    column: u64,
) -> Result<i64> {
    matrix.nonzero_in_row(a).try_fold(0i64, |vac, (b, value)| {
        let cells = cells_in_columns_up_to(partitions[b].as_ref(), column);
        i64::try_from(cells)
            .ok()
            .and_then(|cells| value.checked_mul(cells))
            .and_then(|term| vac.checked_sub(term))
            .ok_or_else(|| {
                Error::MalformedElement(format!(
                    "vacancy number of partition {} at column {} overflows",
                    a, column
                ))
            })
    })
}

/// Evaluate `vacancy(a, row_len)` once per block of equal rows and spread the
/// result over the block.
pub(crate) fn per_block<F>(partitions: &[Vec<u64>], mut vacancy: F) -> Result<Vec<Vec<Rational>>>
where
    F: FnMut(usize, u64) -> Result<Rational>,
{
    let mut all = Vec::with_capacity(partitions.len());
    for (a, rows) in partitions.iter().enumerate() {
        let mut values = Vec::with_capacity(rows.len());
        let mut block: Option<(u64, Rational)> = None;
        for &row_len in rows {
            let value = match block {
                Some((len, value)) if len == row_len => value,
                _ => {
                    let value = vacancy(a, row_len)?;
                    block = Some((row_len, value));
                    value
                }
            };
            values.push(value);
        }
        all.push(values);
    }
    Ok(all)
}
