//! Reference implementation of sparse multiplication
//!
//! A simple column-by-column multiply with a hashmap accumulator. Not
//! optimized; exists as the correctness baseline the distributed path is
//! tested against.

use std::collections::HashMap;
use std::ops::AddAssign;

use num_traits::Num;

use crate::matrix::SparseMatrixCCS;

/// Multiplies two CCS matrices with a hashmap accumulator per output column
///
/// # Panics
///
/// Panics if `a.n_cols != b.n_rows`.
pub fn reference_spmm<T>(a: &SparseMatrixCCS<T>, b: &SparseMatrixCCS<T>) -> SparseMatrixCCS<T>
where
    T: Copy + Num + AddAssign,
{
    assert_eq!(
        a.n_cols, b.n_rows,
        "Matrix dimensions must be compatible for multiplication"
    );

    let mut col_ptr = Vec::with_capacity(b.n_cols + 1);
    let mut row_idx = Vec::new();
    let mut values = Vec::new();

    col_ptr.push(0);

    // Column j of C is the combination of A's columns selected by
    // column j of B
    for j in 0..b.n_cols {
        let mut accum: HashMap<usize, T> = HashMap::new();

        for (k, &b_val) in b.col_iter(j) {
            for (i, &a_val) in a.col_iter(k) {
                *accum.entry(i).or_insert(T::zero()) += a_val * b_val;
            }
        }

        let mut entries: Vec<_> = accum.into_iter().collect();
        entries.sort_unstable_by_key(|&(row, _)| row);

        for (row, val) in entries {
            if !val.is_zero() {
                row_idx.push(row);
                values.push(val);
            }
        }

        col_ptr.push(row_idx.len());
    }

    SparseMatrixCCS::new(a.n_rows, b.n_cols, col_ptr, row_idx, values)
}
