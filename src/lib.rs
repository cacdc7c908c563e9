//! # SPARROW: Sparse multiplication across Rank-Ordered Workers
//!
//! SPARROW is a small library of parallel linear-algebra kernels: dense
//! matrix multiplication and, at its core, distributed sparse matrix
//! multiplication over Compressed Column Storage (CCS).
//!
//! ## Overview
//!
//! The sparse engine splits the output columns of `C = A * B` across a
//! group of workers that communicate only through collective message
//! passing:
//!
//! 1. **Shape broadcast and validation**: every worker reaches the same
//!    proceed/abort verdict from broadcast metadata.
//! 2. **Partitioning**: each worker derives its contiguous column range
//!    from its rank alone with no coordinator assignment.
//! 3. **Local multiply**: Gustavson's algorithm with a scatter
//!    accumulator, cost proportional to the multiply-accumulate work.
//! 4. **Gather and assembly**: rank-ordered fragments concatenate into
//!    one globally valid CCS matrix with rebased column pointers.
//!
//! The message-passing runtime sits behind the
//! [`Communicator`](comm::Communicator) trait; the crate ships a
//! single-worker group and an in-process thread-backed group.
//!
//! ## Usage
//!
//! Single worker:
//!
//! ```
//! use sparrow::{distributed_spmm, EngineConfig, SoloComm, SparseMatrixCCS};
//!
//! let a = SparseMatrixCCS::<f64>::identity(3);
//! let b = SparseMatrixCCS::<f64>::identity(3);
//!
//! let c = distributed_spmm(&SoloComm, &EngineConfig::for_workers(1), Some((&a, &b)))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(c.nnz(), 3);
//! ```
//!
//! A group of cooperating workers, one thread per rank:
//!
//! ```
//! use sparrow::{distributed_spmm, Communicator, EngineConfig, SparseMatrixCCS, ThreadGroup};
//!
//! let results = ThreadGroup::run(2, |comm| {
//!     let input = (comm.rank() == 0)
//!         .then(|| (SparseMatrixCCS::<f64>::identity(4), SparseMatrixCCS::<f64>::identity(4)));
//!
//!     distributed_spmm(
//!         comm,
//!         &EngineConfig::for_workers(2),
//!         input.as_ref().map(|(a, b)| (a, b)),
//!     )
//!     .unwrap()
//! });
//!
//! // Only rank 0 receives the assembled result
//! assert!(results[0].is_some());
//! assert!(results[1].is_none());
//! ```

pub mod accumulator;
pub mod assemble;
pub mod codec;
pub mod comm;
pub mod config;
pub mod engine;
pub mod error;
pub mod interop;
pub mod matrix;
pub mod multiply;
pub mod partition;
pub mod perf;
pub mod task;
pub mod validate;

// Re-export primary components
pub use accumulator::{create_accumulator, Accumulator, DenseAccumulator, SortAccumulator};
pub use assemble::assemble;
pub use codec::{decode, encode, SparseBuffers, SparseBuffersMut};
pub use comm::{Communicator, SoloComm, ThreadGroup};
pub use config::{EngineConfig, PartitionPolicy};
pub use engine::{distributed_spmm, ROOT};
pub use error::{Error, Result};
pub use interop::{from_sprs_csc, to_sprs_csc};
pub use matrix::{reference_spmm, DenseMatrix, SparseMatrixCCS};
pub use multiply::{multiply_columns, PartialResult};
pub use partition::{partition, partition_by_work, ColumnRange};
pub use perf::{Perf, PerfAttr, PerfResults};
pub use task::{
    run_pipeline, DenseInputs, DenseMatMulKernel, Kernel, SparseInputs, SparseMatMulKernel,
};
pub use validate::{conformable, dims_conformable};

/// Version information for the SPARROW library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
