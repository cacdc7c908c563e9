//! Conversions between our CCS type and sprs matrices

use num_traits::Num;
use sprs::CsMat;

use crate::matrix::SparseMatrixCCS;

/// Converts our CCS matrix to a sprs CsMat in CSC storage
pub fn to_sprs_csc<T>(matrix: &SparseMatrixCCS<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    CsMat::new_csc(
        (matrix.n_rows, matrix.n_cols),
        matrix.col_ptr.clone(),
        matrix.row_idx.clone(),
        matrix.values.clone(),
    )
}

/// Converts a sprs CsMat to our CCS format
pub fn from_sprs_csc<T>(matrix: CsMat<T>) -> SparseMatrixCCS<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSC storage
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCCS::new(shape.0, shape.1, indptr, indices, data)
}
