//! Compressed Column Storage (CCS) matrix format implementation
//!
//! The CCS format stores a sparse matrix using three arrays:
//! - col_ptr: array of size n_cols + 1 with indices into row_idx and values
//! - row_idx: array of size nnz containing row indices of non-zero elements
//! - values: array of size nnz containing the non-zero values
//!
//! All kernels in this crate consume and produce CCS. Construction through
//! [`SparseMatrixCCS::new`] asserts array consistency and is meant for
//! trusted in-crate callers; data arriving from caller buffers goes through
//! [`crate::codec::decode`] and [`SparseMatrixCCS::check_structure`] instead.

use std::fmt;

use num_traits::Num;

use crate::error::{Error, Result};

/// A sparse matrix in Compressed Column Storage (CCS) format
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCCS<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Column pointers (size: n_cols + 1)
    /// col_ptr[j] is the index in row_idx and values where column j starts;
    /// col_ptr[n_cols] equals nnz
    pub col_ptr: Vec<usize>,

    /// Row indices (size: nnz)
    pub row_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCCS<T>
where
    T: Copy + Num,
{
    /// Creates a new CCS matrix with the given dimensions and data
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - col_ptr.len() must be n_cols + 1
    /// - row_idx.len() must equal values.len()
    /// - col_ptr[n_cols] must equal row_idx.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(col_ptr.len(), n_cols + 1, "col_ptr.len() must be n_cols + 1");
        assert_eq!(
            row_idx.len(),
            values.len(),
            "row_idx.len() must equal values.len()"
        );
        assert_eq!(
            col_ptr[n_cols],
            row_idx.len(),
            "col_ptr[n_cols] must equal row_idx.len()"
        );

        Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols, "Column index out of bounds");

        let start = self.col_ptr[j];
        let end = self.col_ptr[j + 1];

        self.row_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&row, val)| (row, val))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ptr: vec![0; n_cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        let col_ptr = (0..=n).collect();
        let row_idx = (0..n).collect();
        let values = vec![T::one(); n];

        Self {
            n_rows: n,
            n_cols: n,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Extracts the column block `[start, end)` as a new matrix with
    /// local column pointers starting at zero
    ///
    /// The row dimension is unchanged. This is the shape a worker's
    /// partial result takes before assembly rebases its pointers.
    pub fn slice_columns(&self, start: usize, end: usize) -> Self {
        assert!(start <= end && end <= self.n_cols, "column range out of bounds");

        let lo = self.col_ptr[start];
        let hi = self.col_ptr[end];

        let col_ptr = self.col_ptr[start..=end].iter().map(|&p| p - lo).collect();

        Self {
            n_rows: self.n_rows,
            n_cols: end - start,
            col_ptr,
            row_idx: self.row_idx[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        }
    }

    /// Verifies the structural invariants of the CCS triple
    ///
    /// Checks that col_ptr has the right length and is non-decreasing,
    /// that its last entry matches the stored nonzero count, and that
    /// every row index is within `[0, n_rows)`. Decoded caller data must
    /// pass this check before it reaches the multiply path.
    pub fn check_structure(&self) -> Result<()> {
        if self.col_ptr.len() != self.n_cols + 1 {
            return Err(Error::MalformedInput("col_ptr length is not n_cols + 1"));
        }
        if self.col_ptr[0] != 0 {
            return Err(Error::MalformedInput("col_ptr does not start at zero"));
        }
        if self.row_idx.len() != self.values.len() {
            return Err(Error::MalformedInput(
                "row_idx and values have different lengths",
            ));
        }
        if self.col_ptr[self.n_cols] != self.row_idx.len() {
            return Err(Error::MalformedInput(
                "col_ptr[n_cols] does not equal the nonzero count",
            ));
        }
        for w in self.col_ptr.windows(2) {
            if w[0] > w[1] {
                return Err(Error::MalformedInput("col_ptr is not non-decreasing"));
            }
        }
        for &row in &self.row_idx {
            if row >= self.n_rows {
                return Err(Error::MalformedInput("row index out of range"));
            }
        }
        Ok(())
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCCS<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SparseMatrixCCS {{ {} x {}, nnz: {}",
            self.n_rows,
            self.n_cols,
            self.nnz()
        )?;

        let shown = 5.min(self.n_cols);
        for j in 0..shown {
            write!(f, "  col {}:", j)?;
            for (row, val) in self.col_iter(j).take(5) {
                write!(f, " ({}, {:?})", row, val)?;
            }
            let len = self.col_ptr[j + 1] - self.col_ptr[j];
            if len > 5 {
                write!(f, " ... ({} more)", len - 5)?;
            }
            writeln!(f)?;
        }
        if self.n_cols > shown {
            writeln!(f, "  ... ({} more columns)", self.n_cols - shown)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix() {
        let matrix = SparseMatrixCCS::new(
            3,
            3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
        );

        assert_eq!(matrix.n_rows, 3);
        assert_eq!(matrix.n_cols, 3);
        assert_eq!(matrix.nnz(), 5);
    }

    #[test]
    fn test_col_iter() {
        let matrix = SparseMatrixCCS::new(
            3,
            3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
        );

        let col0: Vec<_> = matrix.col_iter(0).collect();
        assert_eq!(col0, vec![(0, &1), (2, &4)]);

        let col2: Vec<_> = matrix.col_iter(2).collect();
        assert_eq!(col2, vec![(2, &5)]);
    }

    #[test]
    fn test_identity() {
        let identity = SparseMatrixCCS::<i32>::identity(3);

        assert_eq!(identity.col_ptr, vec![0, 1, 2, 3]);
        assert_eq!(identity.row_idx, vec![0, 1, 2]);
        assert_eq!(identity.values, vec![1, 1, 1]);
    }

    #[test]
    fn test_slice_columns() {
        let matrix = SparseMatrixCCS::new(
            3,
            3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
        );

        let slice = matrix.slice_columns(1, 3);
        assert_eq!(slice.n_rows, 3);
        assert_eq!(slice.n_cols, 2);
        assert_eq!(slice.col_ptr, vec![0, 2, 3]);
        assert_eq!(slice.row_idx, vec![0, 1, 2]);
        assert_eq!(slice.values, vec![2, 3, 5]);

        let empty = matrix.slice_columns(2, 2);
        assert_eq!(empty.n_cols, 0);
        assert_eq!(empty.col_ptr, vec![0]);
        assert_eq!(empty.nnz(), 0);
    }

    #[test]
    fn test_check_structure_accepts_valid() {
        let matrix = SparseMatrixCCS::new(
            3,
            3,
            vec![0, 2, 4, 5],
            vec![0, 2, 0, 1, 2],
            vec![1.0, 4.0, 2.0, 3.0, 5.0],
        );
        assert!(matrix.check_structure().is_ok());
        assert!(SparseMatrixCCS::<f64>::zeros(0, 0).check_structure().is_ok());
    }

    #[test]
    fn test_check_structure_rejects_decreasing_col_ptr() {
        let matrix = SparseMatrixCCS {
            n_rows: 2,
            n_cols: 2,
            col_ptr: vec![0, 2, 1],
            row_idx: vec![0, 1],
            values: vec![1.0, 2.0],
        };
        assert!(matches!(
            matrix.check_structure(),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_check_structure_rejects_row_out_of_range() {
        let matrix = SparseMatrixCCS {
            n_rows: 2,
            n_cols: 1,
            col_ptr: vec![0, 1],
            row_idx: vec![5],
            values: vec![1.0],
        };
        assert!(matches!(
            matrix.check_structure(),
            Err(Error::MalformedInput("row index out of range"))
        ));
    }

    #[test]
    #[should_panic(expected = "col_ptr.len() must be n_cols + 1")]
    fn test_invalid_col_ptr() {
        SparseMatrixCCS::new(
            3,
            3,
            vec![0, 2, 4], // Missing last element
            vec![0, 2, 0, 1, 2],
            vec![1, 4, 2, 3, 5],
        );
    }
}
