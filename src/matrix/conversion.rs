//! Conversion functions between matrix formats

use num_traits::Num;

use crate::matrix::{DenseMatrix, SparseMatrixCCS};

impl<T: Copy + Num> SparseMatrixCCS<T> {
    /// Expands this CCS matrix to a dense row-major matrix
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.n_rows, self.n_cols);

        for j in 0..self.n_cols {
            for (row, &val) in self.col_iter(j) {
                dense.set(row, j, val);
            }
        }

        dense
    }

    /// Compresses a dense matrix to CCS, dropping exact zeros
    pub fn from_dense(dense: &DenseMatrix<T>) -> Self {
        let mut col_ptr = Vec::with_capacity(dense.n_cols + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();

        col_ptr.push(0);
        for j in 0..dense.n_cols {
            for i in 0..dense.n_rows {
                let val = dense.get(i, j);
                if !val.is_zero() {
                    row_idx.push(i);
                    values.push(val);
                }
            }
            col_ptr.push(row_idx.len());
        }

        Self {
            n_rows: dense.n_rows,
            n_cols: dense.n_cols,
            col_ptr,
            row_idx,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_roundtrip() {
        // [1 0 4; 0 3 0; 2 0 5]
        let dense = DenseMatrix::new(
            3,
            3,
            vec![1.0, 0.0, 4.0, 0.0, 3.0, 0.0, 2.0, 0.0, 5.0],
        );

        let ccs = SparseMatrixCCS::from_dense(&dense);
        assert_eq!(ccs.nnz(), 5);
        assert_eq!(ccs.col_ptr, vec![0, 2, 3, 5]);
        assert_eq!(ccs.row_idx, vec![0, 2, 1, 0, 2]);

        assert_eq!(ccs.to_dense(), dense);
    }

    #[test]
    fn test_from_dense_all_zero() {
        let dense = DenseMatrix::<f64>::zeros(2, 4);
        let ccs = SparseMatrixCCS::from_dense(&dense);
        assert_eq!(ccs.nnz(), 0);
        assert_eq!(ccs.col_ptr, vec![0, 0, 0, 0, 0]);
    }
}
