//! Dense row-major matrix used by the companion dense kernel
//!
//! The dense kernel is local to each worker; only the sparse kernel is
//! distributed. The type doubles as the dense reference target tests
//! compare the CCS path against.

use std::ops::AddAssign;

use ndarray::Array2;
use num_traits::Num;
use rayon::prelude::*;

use crate::error::{Error, Result};

/// A dense matrix stored as a flat row-major array
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Element data, length n_rows * n_cols, row-major
    pub data: Vec<T>,
}

impl<T> DenseMatrix<T>
where
    T: Copy + Num,
{
    /// Creates a new dense matrix from row-major data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is not `n_rows * n_cols`.
    pub fn new(n_rows: usize, n_cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            n_rows * n_cols,
            "data.len() must equal n_rows * n_cols"
        );
        Self {
            n_rows,
            n_cols,
            data,
        }
    }

    /// Creates a zero-filled matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![T::zero(); n_rows * n_cols],
        }
    }

    /// Returns the element at (i, j)
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.n_cols + j]
    }

    /// Sets the element at (i, j)
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[i * self.n_cols + j] = value;
    }

    /// Converts to an ndarray `Array2`
    pub fn to_array2(&self) -> Array2<T> {
        Array2::from_shape_vec((self.n_rows, self.n_cols), self.data.clone())
            .expect("dimensions verified at construction")
    }

    /// Builds a dense matrix from an ndarray `Array2`
    pub fn from_array2(array: &Array2<T>) -> Self {
        let (n_rows, n_cols) = array.dim();
        Self {
            n_rows,
            n_cols,
            data: array.iter().copied().collect(),
        }
    }
}

impl<T> DenseMatrix<T>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    /// Multiplies two dense matrices, processing output rows in parallel
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when `self.n_cols != other.n_rows`.
    pub fn multiply(&self, other: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        if self.n_cols != other.n_rows {
            return Err(Error::ShapeMismatch {
                a_cols: self.n_cols,
                b_rows: other.n_rows,
            });
        }

        let n = other.n_cols;
        let mut out = vec![T::zero(); self.n_rows * n];

        out.par_chunks_mut(n.max(1))
            .enumerate()
            .for_each(|(i, out_row)| {
                for k in 0..self.n_cols {
                    let a_ik = self.get(i, k);
                    let b_row = &other.data[k * n..(k + 1) * n];
                    for (o, &b_kj) in out_row.iter_mut().zip(b_row) {
                        *o += a_ik * b_kj;
                    }
                }
            });

        Ok(DenseMatrix {
            n_rows: self.n_rows,
            n_cols: n,
            data: out,
        })
    }
}
