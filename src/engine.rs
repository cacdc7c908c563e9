//! Distributed sparse multiplication engine
//!
//! Single-program-multiple-data: every worker calls
//! [`distributed_spmm`] with the same communicator group; only the root
//! (rank 0) supplies the input matrices and only the root receives the
//! assembled result. The collective schedule is fixed (shape broadcast,
//! A broadcast, B broadcast, partial gather) and every worker passes
//! through all of it, empty column range or not, so the group can never
//! split.

use tracing::debug;

use crate::assemble::assemble;
use crate::comm::Communicator;
use crate::config::{EngineConfig, PartitionPolicy};
use crate::error::{Error, Result};
use crate::matrix::SparseMatrixCCS;
use crate::multiply::{multiply_columns, PartialResult};
use crate::partition::{partition, partition_by_work, ColumnRange};
use crate::validate::dims_conformable;

/// Rank whose buffers are authoritative for input and output
pub const ROOT: usize = 0;

/// Shape metadata broadcast ahead of the matrices
///
/// Carries everything a worker needs to reach the validation verdict, so
/// the decision is a pure function of broadcast data and all workers
/// agree on whether to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShapeHeader {
    m: usize,
    k: usize,
    n: usize,
    a_cols: usize,
    b_rows: usize,
    a_nnz: usize,
    b_nnz: usize,
}

impl ShapeHeader {
    fn of(a: &SparseMatrixCCS<f64>, b: &SparseMatrixCCS<f64>) -> Self {
        Self {
            m: a.n_rows,
            k: a.n_cols,
            n: b.n_cols,
            a_cols: a.n_cols,
            b_rows: b.n_rows,
            a_nnz: a.nnz(),
            b_nnz: b.nnz(),
        }
    }

    fn conformable(&self) -> bool {
        self.a_cols == self.k
            && self.b_rows == self.k
            && dims_conformable(self.m, self.k, self.n, self.a_nnz, self.b_nnz)
    }
}

/// Computes `C = A * B` across the worker group
///
/// The root passes `Some((a, b))`; every other worker passes `None`.
/// Returns `Ok(Some(c))` at the root and `Ok(None)` elsewhere. Inputs
/// are expected to be structurally valid (see
/// [`SparseMatrixCCS::check_structure`]); shape conformability is
/// re-checked collectively here so all workers agree on the verdict.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] on every worker when the broadcast
/// shapes do not conform. No collective is entered after a failed
/// validation.
pub fn distributed_spmm<C: Communicator>(
    comm: &C,
    config: &EngineConfig,
    input: Option<(&SparseMatrixCCS<f64>, &SparseMatrixCCS<f64>)>,
) -> Result<Option<SparseMatrixCCS<f64>>> {
    let rank = comm.rank();
    let size = comm.size();

    let header = comm.broadcast(
        ROOT,
        input.map(|(a, b)| ShapeHeader::of(a, b)),
    );

    if !header.conformable() {
        // Same verdict on every worker; abort is collective
        return Err(Error::ShapeMismatch {
            a_cols: header.a_cols,
            b_rows: header.b_rows,
        });
    }

    // A is fully replicated: any column of B may reference any row
    // range of A. B rides the same broadcast and each worker keeps only
    // its slice.
    let a = comm.broadcast(ROOT, input.map(|(a, _)| a.clone()));
    let b = comm.broadcast(ROOT, input.map(|(_, b)| b.clone()));

    let range = match config.partition_policy {
        PartitionPolicy::BlockColumns => partition(header.n, size, rank),
        PartitionPolicy::BalancedWork => partition_by_work(&b.col_ptr, size)[rank],
    };
    debug!(rank, start = range.start, end = range.end, "columns assigned");

    let b_local = b.slice_columns(range.start, range.end);
    drop(b);

    let local = multiply_columns(
        &a,
        &b_local,
        ColumnRange {
            start: 0,
            end: b_local.n_cols,
        },
        config.dense_accum_threshold,
    );
    let partial = PartialResult {
        start_col: range.start,
        matrix: local.matrix,
    };

    let gathered = comm.gather(ROOT, partial);

    match gathered {
        Some(partials) => {
            debug!(
                workers = partials.len(),
                nnz = partials.iter().map(|p| p.matrix.nnz()).sum::<usize>(),
                "gathered partial results"
            );
            assemble(header.m, header.n, partials).map(Some)
        }
        None => Ok(None),
    }
}
