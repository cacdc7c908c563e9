//! Local multiplier: Gustavson's algorithm over a worker's column range
//!
//! For each assigned column j of B, the nonzeros (r, bv) of that column
//! select columns of A; every nonzero (i, av) of A's column r contributes
//! av * bv to output row i. Contributions scatter into an accumulator and
//! compact into ascending row order, so cost is proportional to the
//! multiply-accumulate operations actually performed rather than to
//! rows x cols. The accumulation order is fixed (B-column order, A-column
//! ascending), which keeps values bit-identical across worker counts.
//!
//! Inputs are assumed validated; this path performs no defensive checks.

use std::ops::AddAssign;

use num_traits::Num;

use crate::accumulator::create_accumulator;
use crate::matrix::SparseMatrixCCS;
use crate::partition::ColumnRange;

/// A worker-local CCS fragment covering a contiguous output column range
///
/// Column pointers are local (start at zero) until the assembler rebases
/// them by the running nonzero total of lower-ranked workers.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialResult<T> {
    /// First output column this fragment covers
    pub start_col: usize,

    /// The fragment itself; `matrix.n_cols` is the range length
    pub matrix: SparseMatrixCCS<T>,
}

/// Computes the output columns in `range` of `C = A * B`
///
/// `a` is the full replica of A every worker holds; `b` is the full B
/// (only columns inside `range` are read). Workers with an empty range
/// produce an empty, structurally valid fragment.
pub fn multiply_columns<T>(
    a: &SparseMatrixCCS<T>,
    b: &SparseMatrixCCS<T>,
    range: ColumnRange,
    dense_threshold: usize,
) -> PartialResult<T>
where
    T: Copy + Num + AddAssign + 'static,
{
    let mut accumulator = create_accumulator::<T>(a.n_rows, dense_threshold);

    let mut col_ptr = Vec::with_capacity(range.len() + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    col_ptr.push(0);

    for j in range.start..range.end {
        for (r, &b_val) in b.col_iter(j) {
            for (i, &a_val) in a.col_iter(r) {
                accumulator.accumulate(i, a_val * b_val);
            }
        }

        let (rows, vals) = accumulator.drain_sorted();
        row_idx.extend(rows);
        values.extend(vals);
        col_ptr.push(row_idx.len());
    }

    PartialResult {
        start_col: range.start,
        matrix: SparseMatrixCCS::new(a.n_rows, range.len(), col_ptr, row_idx, values),
    }
}
