//! Sort-based accumulator
//!
//! Collects (row, value) pairs unsorted, then sorts and merges on drain.
//! Preferable when columns touch few rows relative to the row dimension,
//! since no per-row scratch is allocated.

use std::ops::AddAssign;

use num_traits::Num;

use crate::accumulator::Accumulator;

/// Sort-then-merge accumulator for a single output column
pub struct SortAccumulator<T> {
    rows: Vec<usize>,
    values: Vec<T>,
}

impl<T> SortAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> Default for SortAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Accumulator<T> for SortAccumulator<T>
where
    T: Copy + Num + AddAssign,
{
    fn reset(&mut self) {
        self.rows.clear();
        self.values.clear();
    }

    fn accumulate(&mut self, row: usize, val: T) {
        self.rows.push(row);
        self.values.push(val);
    }

    fn drain_sorted(&mut self) -> (Vec<usize>, Vec<T>) {
        if self.rows.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        // Stable sort keeps insertion order within a row, fixing the
        // floating-point summation order
        order.sort_by_key(|&i| self.rows[i]);

        let mut rows = Vec::new();
        let mut vals = Vec::new();

        let mut current_row = self.rows[order[0]];
        let mut current_val = self.values[order[0]];

        for &i in order.iter().skip(1) {
            if self.rows[i] == current_row {
                current_val += self.values[i];
            } else {
                if !current_val.is_zero() {
                    rows.push(current_row);
                    vals.push(current_val);
                }
                current_row = self.rows[i];
                current_val = self.values[i];
            }
        }
        if !current_val.is_zero() {
            rows.push(current_row);
            vals.push(current_val);
        }

        self.rows.clear();
        self.values.clear();

        (rows, vals)
    }
}
