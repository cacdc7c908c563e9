//! Accumulator implementations for sparse matrix multiplication
//!
//! The local multiplier scatters contributions into a per-column
//! workspace and compacts it into ascending row order. Two strategies
//! cover the density spectrum: a dense scratch array whose reset cost is
//! proportional to the rows actually touched, and a sort-based list for
//! very tall matrices where an O(rows) scratch is wasteful. Both drain
//! in ascending row order and drop entries whose accumulated sum is
//! exactly zero, so the assembled result is independent of the choice.

pub mod dense;
pub mod sort;

use std::ops::AddAssign;

use num_traits::Num;

/// Workspace that accumulates scattered (row, value) contributions for
/// one output column
pub trait Accumulator<T>
where
    T: Copy + Num + AddAssign,
{
    /// Discard all accumulated state
    fn reset(&mut self);

    /// Add `val` to the running sum for `row`
    fn accumulate(&mut self, row: usize, val: T);

    /// Extract the accumulated column as (row_indices, values) sorted by
    /// ascending row, dropping exact zeros, and reset the workspace for
    /// the next column
    fn drain_sorted(&mut self) -> (Vec<usize>, Vec<T>);
}

/// Create an accumulator suited to the output row dimension
///
/// Small row counts use the dense scratch; above `dense_threshold` the
/// sort-based accumulator avoids allocating a scratch slot per row.
pub fn create_accumulator<T>(n_rows: usize, dense_threshold: usize) -> Box<dyn Accumulator<T>>
where
    T: Copy + Num + AddAssign + 'static,
{
    if n_rows <= dense_threshold {
        Box::new(dense::DenseAccumulator::new(n_rows))
    } else {
        Box::new(sort::SortAccumulator::new())
    }
}

pub use dense::DenseAccumulator;
pub use sort::SortAccumulator;
