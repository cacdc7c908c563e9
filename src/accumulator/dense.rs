//! Dense scratch accumulator
//!
//! Keeps one scratch slot per output row plus a list of touched rows.
//! Reset walks the touched list only, so per-column cost tracks the work
//! actually done rather than the row count.

use std::ops::AddAssign;

use num_traits::Num;

use crate::accumulator::Accumulator;

/// Dense accumulator for a single output column
pub struct DenseAccumulator<T> {
    /// Scratch array indexed by row
    values: Vec<T>,

    /// Which scratch slots currently hold a contribution
    occupied: Vec<bool>,

    /// Rows written since the last reset, unsorted
    touched: Vec<usize>,
}

impl<T> DenseAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    /// Create an accumulator with one slot per output row
    pub fn new(n_rows: usize) -> Self {
        Self {
            values: vec![T::zero(); n_rows],
            occupied: vec![false; n_rows],
            touched: Vec::new(),
        }
    }
}

impl<T> Accumulator<T> for DenseAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    fn reset(&mut self) {
        for &row in &self.touched {
            self.occupied[row] = false;
        }
        self.touched.clear();
    }

    fn accumulate(&mut self, row: usize, val: T) {
        if self.occupied[row] {
            self.values[row] += val;
        } else {
            self.occupied[row] = true;
            self.values[row] = val;
            self.touched.push(row);
        }
    }

    fn drain_sorted(&mut self) -> (Vec<usize>, Vec<T>) {
        self.touched.sort_unstable();

        let mut rows = Vec::with_capacity(self.touched.len());
        let mut vals = Vec::with_capacity(self.touched.len());

        for &row in &self.touched {
            self.occupied[row] = false;
            let val = self.values[row];
            if !val.is_zero() {
                rows.push(row);
                vals.push(val);
            }
        }
        self.touched.clear();

        (rows, vals)
    }
}
