//! Shape validation run before any computation starts
//!
//! Validation must reach the same verdict on every worker: a group where
//! some workers proceed while others abort deadlocks at the next
//! collective. Both checks here are pure functions of broadcast shape
//! metadata, so agreement is structural rather than hoped for.

use num_traits::Num;

use crate::matrix::SparseMatrixCCS;

/// Checks conformability of the declared problem dimensions
///
/// `m`, `k`, `n` are the broadcast dimensions of `C(m x n) = A(m x k) * B(k x n)`.
/// `a_nnz` and `b_nnz` are the declared nonzero counts. A zero dimension
/// is only acceptable while the affected matrix is empty.
pub fn dims_conformable(m: usize, k: usize, n: usize, a_nnz: usize, b_nnz: usize) -> bool {
    if (m == 0 || k == 0) && a_nnz > 0 {
        return false;
    }
    if (k == 0 || n == 0) && b_nnz > 0 {
        return false;
    }
    true
}

/// Checks that two decoded matrices match the declared dimensions
///
/// Extends [`dims_conformable`] with the matrices' own shape fields:
/// `a` must be m x k and `b` must be k x n.
pub fn conformable<T>(
    m: usize,
    k: usize,
    n: usize,
    a: &SparseMatrixCCS<T>,
    b: &SparseMatrixCCS<T>,
) -> bool
where
    T: Copy + Num,
{
    if a.n_rows != m || a.n_cols != k {
        return false;
    }
    if b.n_rows != k || b.n_cols != n {
        return false;
    }
    dims_conformable(m, k, n, a.nnz(), b.nnz())
}
