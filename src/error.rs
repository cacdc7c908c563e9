//! Error types for sparrow
//!
//! All fallible operations in the crate return [`Result`]. The variants
//! mirror the failure points of the kernel lifecycle: shape disagreement
//! before any communication, structural defects in decoded CCS input,
//! and output-buffer exhaustion at marshalling time. The multiply hot
//! path itself never constructs an error; its inputs are validated
//! upstream.

use thiserror::Error;

/// Result type alias using sparrow's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sparrow operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Declared matrix dimensions are inconsistent or non-conforming
    #[error("shape mismatch: left operand has {a_cols} columns, right operand has {b_rows} rows")]
    ShapeMismatch {
        /// Column count of the left operand
        a_cols: usize,
        /// Row count of the right operand
        b_rows: usize,
    },

    /// The assembled result needs more storage than the caller provided
    #[error("output capacity exceeded: {needed} slots needed, {capacity} provided")]
    CapacityExceeded {
        /// Slots required to hold the result
        needed: usize,
        /// Slots declared by the caller
        capacity: usize,
    },

    /// A structural invariant of the CCS triple is violated
    #[error("malformed CCS input: {0}")]
    MalformedInput(&'static str),

    /// Gathered partial results do not tile the output column range
    #[error("gathered fragments do not tile the column range: expected columns to resume at {expected}, fragment starts at {got}")]
    InvalidGather {
        /// Column index where the next fragment must start
        expected: usize,
        /// Column index the fragment actually starts at
        got: usize,
    },
}
