//! Assembly of gathered partial results into one CCS matrix
//!
//! Fragments arrive ordered by rank, and because the partitioner hands
//! out contiguous rank-ordered column blocks, concatenating them in that
//! order fixes the global column order. Column pointers are rebased by
//! the running nonzero total contributed by lower-ranked workers.

use std::ops::AddAssign;

use num_traits::Num;

use crate::error::{Error, Result};
use crate::matrix::SparseMatrixCCS;
use crate::multiply::PartialResult;

/// Concatenates rank-ordered fragments into a globally valid CCS matrix
///
/// # Errors
///
/// Returns [`Error::InvalidGather`] when the fragments do not tile
/// `[0, n_cols)` contiguously in order, the symptom of a gather that
/// lost rank ordering or of mismatched partitioning.
pub fn assemble<T>(
    n_rows: usize,
    n_cols: usize,
    partials: Vec<PartialResult<T>>,
) -> Result<SparseMatrixCCS<T>>
where
    T: Copy + Num + AddAssign,
{
    let total_nnz: usize = partials.iter().map(|p| p.matrix.nnz()).sum();

    let mut col_ptr = Vec::with_capacity(n_cols + 1);
    let mut row_idx = Vec::with_capacity(total_nnz);
    let mut values = Vec::with_capacity(total_nnz);

    col_ptr.push(0);
    let mut next_col = 0;
    let mut offset = 0;

    for partial in partials {
        if partial.start_col != next_col {
            return Err(Error::InvalidGather {
                expected: next_col,
                got: partial.start_col,
            });
        }

        // Skip the fragment's leading zero; every remaining pointer is
        // rebased by the nonzeros of lower-ranked fragments
        col_ptr.extend(partial.matrix.col_ptr[1..].iter().map(|&p| p + offset));

        offset += partial.matrix.nnz();
        next_col += partial.matrix.n_cols;

        row_idx.extend(partial.matrix.row_idx);
        values.extend(partial.matrix.values);
    }

    if next_col != n_cols {
        return Err(Error::InvalidGather {
            expected: n_cols,
            got: next_col,
        });
    }

    tracing::debug!(n_rows, n_cols, nnz = offset, "assembled gathered fragments");

    Ok(SparseMatrixCCS::new(n_rows, n_cols, col_ptr, row_idx, values))
}
