//! Buffer codec for the CCS triple
//!
//! Kernel callers exchange matrices as three flat buffers paired with
//! declared element counts, over-allocated at the caller's discretion.
//! [`decode`] reconstructs a [`SparseMatrixCCS`] from such buffers and
//! [`encode`] writes one back, failing with
//! [`Error::CapacityExceeded`](crate::Error::CapacityExceeded) instead of
//! truncating. Decode performs length bounds checks only; deep structural
//! validation is [`SparseMatrixCCS::check_structure`]'s job.

use num_traits::Num;

use crate::error::{Error, Result};
use crate::matrix::SparseMatrixCCS;

/// Borrowed input buffers holding a CCS triple
#[derive(Debug, Clone, Copy)]
pub struct SparseBuffers<'a, T> {
    /// Non-zero values
    pub values: &'a [T],
    /// Row index per non-zero
    pub row_idx: &'a [usize],
    /// Column start offsets, at least n_cols + 1 entries
    pub col_ptr: &'a [usize],
}

/// Mutable output buffers receiving a CCS triple
#[derive(Debug)]
pub struct SparseBuffersMut<'a, T> {
    /// Non-zero values
    pub values: &'a mut [T],
    /// Row index per non-zero
    pub row_idx: &'a mut [usize],
    /// Column start offsets
    pub col_ptr: &'a mut [usize],
}

/// Reconstructs a CCS matrix from caller buffers
///
/// The buffers may be larger than the data they hold; the nonzero count
/// is taken from `col_ptr[n_cols]` and only that prefix of `values` and
/// `row_idx` is copied out.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when a buffer is shorter than its
/// declared contents.
pub fn decode<T>(n_rows: usize, n_cols: usize, bufs: SparseBuffers<'_, T>) -> Result<SparseMatrixCCS<T>>
where
    T: Copy + Num,
{
    if bufs.col_ptr.len() < n_cols + 1 {
        return Err(Error::MalformedInput(
            "col_ptr buffer shorter than n_cols + 1",
        ));
    }

    let nnz = bufs.col_ptr[n_cols];
    if bufs.values.len() < nnz {
        return Err(Error::MalformedInput(
            "values buffer shorter than declared nonzero count",
        ));
    }
    if bufs.row_idx.len() < nnz {
        return Err(Error::MalformedInput(
            "row_idx buffer shorter than declared nonzero count",
        ));
    }

    Ok(SparseMatrixCCS {
        n_rows,
        n_cols,
        col_ptr: bufs.col_ptr[..=n_cols].to_vec(),
        row_idx: bufs.row_idx[..nnz].to_vec(),
        values: bufs.values[..nnz].to_vec(),
    })
}

/// Writes a CCS matrix into caller buffers, returning the nonzero count
///
/// All three capacities are checked before anything is written, so a
/// failed encode leaves the buffers untouched.
///
/// # Errors
///
/// Returns [`Error::CapacityExceeded`] when any destination buffer is
/// smaller than the matrix requires.
pub fn encode<T>(matrix: &SparseMatrixCCS<T>, bufs: &mut SparseBuffersMut<'_, T>) -> Result<usize>
where
    T: Copy + Num,
{
    let nnz = matrix.nnz();

    if bufs.values.len() < nnz {
        return Err(Error::CapacityExceeded {
            needed: nnz,
            capacity: bufs.values.len(),
        });
    }
    if bufs.row_idx.len() < nnz {
        return Err(Error::CapacityExceeded {
            needed: nnz,
            capacity: bufs.row_idx.len(),
        });
    }
    if bufs.col_ptr.len() < matrix.n_cols + 1 {
        return Err(Error::CapacityExceeded {
            needed: matrix.n_cols + 1,
            capacity: bufs.col_ptr.len(),
        });
    }

    bufs.values[..nnz].copy_from_slice(&matrix.values);
    bufs.row_idx[..nnz].copy_from_slice(&matrix.row_idx);
    bufs.col_ptr[..=matrix.n_cols].copy_from_slice(&matrix.col_ptr);

    Ok(nnz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_with_slack() {
        // Buffers over-allocated beyond the data they hold
        let values = vec![1.0, 2.0, 0.0, 0.0];
        let row_idx = vec![0, 1, 0, 0];
        let col_ptr = vec![0, 1, 2, 0, 0];

        let m = decode(
            2,
            2,
            SparseBuffers {
                values: &values,
                row_idx: &row_idx,
                col_ptr: &col_ptr,
            },
        )
        .unwrap();

        assert_eq!(m.nnz(), 2);
        assert_eq!(m.col_ptr, vec![0, 1, 2]);
        assert_eq!(m.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_decode_short_buffer() {
        let values = vec![1.0];
        let row_idx = vec![0, 1];
        let col_ptr = vec![0, 1, 2];

        let err = decode(
            2,
            2,
            SparseBuffers {
                values: &values,
                row_idx: &row_idx,
                col_ptr: &col_ptr,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_encode_roundtrip() {
        let m = SparseMatrixCCS::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![3.0, 4.0]);

        let mut values = vec![0.0; 8];
        let mut row_idx = vec![0; 8];
        let mut col_ptr = vec![0; 8];

        let written = encode(
            &m,
            &mut SparseBuffersMut {
                values: &mut values,
                row_idx: &mut row_idx,
                col_ptr: &mut col_ptr,
            },
        )
        .unwrap();

        assert_eq!(written, 2);
        assert_eq!(&values[..2], &[3.0, 4.0]);
        assert_eq!(&col_ptr[..3], &[0, 1, 2]);

        let back = decode(
            2,
            2,
            SparseBuffers {
                values: &values,
                row_idx: &row_idx,
                col_ptr: &col_ptr,
            },
        )
        .unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_encode_capacity_exceeded_leaves_buffers_untouched() {
        let m = SparseMatrixCCS::new(2, 2, vec![0, 1, 2], vec![0, 1], vec![3.0, 4.0]);

        let mut values = vec![9.0; 1];
        let mut row_idx = vec![7; 8];
        let mut col_ptr = vec![7; 8];

        let err = encode(
            &m,
            &mut SparseBuffersMut {
                values: &mut values,
                row_idx: &mut row_idx,
                col_ptr: &mut col_ptr,
            },
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::CapacityExceeded {
                needed: 2,
                capacity: 1
            }
        );
        assert_eq!(values, vec![9.0]);
        assert_eq!(row_idx, vec![7; 8]);
        assert_eq!(col_ptr, vec![7; 8]);
    }
}
