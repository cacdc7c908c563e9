//! Kernel lifecycle: validate, pre-process, run, post-process
//!
//! Kernels are driven through four ordered phases by the surrounding
//! harness. `run` must not be called after a failed `validate`; phase
//! order is asserted. Input and output travel as flat buffers with
//! caller-declared counts; only the root worker's buffers are
//! populated, and only the root's output buffers are written back.

use crate::codec::{self, SparseBuffers, SparseBuffersMut};
use crate::comm::Communicator;
use crate::config::EngineConfig;
use crate::engine::{distributed_spmm, ROOT};
use crate::error::{Error, Result};
use crate::matrix::{DenseMatrix, SparseMatrixCCS};
use crate::validate::{conformable, dims_conformable};

/// The four-phase execution contract kernels implement
///
/// Callers invoke the phases strictly in order:
/// `validate` → `pre_process` → `run` → `post_process`.
pub trait Kernel {
    /// Checks that declared shapes and buffer counts are usable
    fn validate(&mut self) -> bool;

    /// Decodes and structurally checks the input buffers
    fn pre_process(&mut self) -> Result<()>;

    /// Executes the kernel computation
    fn run(&mut self) -> Result<()>;

    /// Writes results back into the caller's output buffers
    fn post_process(&mut self) -> Result<()>;
}

// post_process cycles back to Created so the same kernel can be driven
// through the pipeline repeatedly over identical inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Validated,
    PreProcessed,
    Ran,
}

/// Input buffers for the sparse kernel, present on the root worker only
pub struct SparseInputs<'a> {
    /// Declared result row count (rows of A)
    pub m: usize,
    /// Declared inner dimension (columns of A, rows of B)
    pub k: usize,
    /// Declared result column count (columns of B)
    pub n: usize,
    /// Matrix A triple
    pub a: SparseBuffers<'a, f64>,
    /// Matrix B triple
    pub b: SparseBuffers<'a, f64>,
}

/// The distributed sparse multiplication kernel
///
/// Every worker constructs one (the root with `Some(inputs)` and output
/// buffers, the rest with `None`) and drives it through the four phases
/// in lockstep.
pub struct SparseMatMulKernel<'a, C: Communicator> {
    comm: &'a C,
    config: EngineConfig,
    inputs: Option<SparseInputs<'a>>,
    outputs: Option<SparseBuffersMut<'a, f64>>,
    decoded: Option<(SparseMatrixCCS<f64>, SparseMatrixCCS<f64>)>,
    result: Option<SparseMatrixCCS<f64>>,
    phase: Phase,
    valid: bool,
}

impl<'a, C: Communicator> SparseMatMulKernel<'a, C> {
    /// Creates a kernel instance for this worker
    ///
    /// `inputs` and `outputs` are `Some` on the root worker and `None`
    /// elsewhere; non-root output buffers are never written.
    pub fn new(
        comm: &'a C,
        config: EngineConfig,
        inputs: Option<SparseInputs<'a>>,
        outputs: Option<SparseBuffersMut<'a, f64>>,
    ) -> Self {
        Self {
            comm,
            config,
            inputs,
            outputs,
            decoded: None,
            result: None,
            phase: Phase::Created,
            valid: false,
        }
    }

    /// The assembled result, available on the root after `run`
    pub fn result(&self) -> Option<&SparseMatrixCCS<f64>> {
        self.result.as_ref()
    }
}

impl<C: Communicator> Kernel for SparseMatMulKernel<'_, C> {
    fn validate(&mut self) -> bool {
        assert_eq!(self.phase, Phase::Created, "validate must run first");
        self.phase = Phase::Validated;

        // Only the root holds populated buffers at this point; the
        // engine re-validates collectively on broadcast shapes
        self.valid = match &self.inputs {
            None => self.comm.rank() != ROOT,
            Some(inputs) => {
                let a_nnz = inputs.a.col_ptr.get(inputs.k).copied();
                let b_nnz = inputs.b.col_ptr.get(inputs.n).copied();
                match (a_nnz, b_nnz) {
                    (Some(a_nnz), Some(b_nnz)) => {
                        dims_conformable(inputs.m, inputs.k, inputs.n, a_nnz, b_nnz)
                            && self.outputs.is_some()
                    }
                    _ => false,
                }
            }
        };
        self.valid
    }

    fn pre_process(&mut self) -> Result<()> {
        assert_eq!(self.phase, Phase::Validated, "pre_process must follow validate");
        assert!(self.valid, "pre_process after failed validation");
        self.phase = Phase::PreProcessed;

        if let Some(inputs) = &self.inputs {
            let a = codec::decode(inputs.m, inputs.k, inputs.a)?;
            let b = codec::decode(inputs.k, inputs.n, inputs.b)?;

            a.check_structure()?;
            b.check_structure()?;

            if !conformable(inputs.m, inputs.k, inputs.n, &a, &b) {
                return Err(Error::ShapeMismatch {
                    a_cols: a.n_cols,
                    b_rows: b.n_rows,
                });
            }

            self.decoded = Some((a, b));
        }
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        assert_eq!(self.phase, Phase::PreProcessed, "run must follow pre_process");
        self.phase = Phase::Ran;

        let input = self.decoded.as_ref().map(|(a, b)| (a, b));
        self.result = distributed_spmm(self.comm, &self.config, input)?;
        Ok(())
    }

    fn post_process(&mut self) -> Result<()> {
        assert_eq!(self.phase, Phase::Ran, "post_process must follow run");
        self.phase = Phase::Created;

        // Only the coordinating worker's buffers are authoritative
        if let (Some(result), Some(outputs)) = (&self.result, &mut self.outputs) {
            codec::encode(result, outputs)?;
        }
        Ok(())
    }
}

/// Input buffers for the dense kernel
pub struct DenseInputs<'a> {
    /// Rows of A
    pub rows_a: usize,
    /// Columns of A
    pub cols_a: usize,
    /// Rows of B
    pub rows_b: usize,
    /// Columns of B
    pub cols_b: usize,
    /// A, row-major, rows_a * cols_a elements
    pub a: &'a [f64],
    /// B, row-major, rows_b * cols_b elements
    pub b: &'a [f64],
}

/// The companion dense multiplication kernel, local to one worker
pub struct DenseMatMulKernel<'a> {
    inputs: DenseInputs<'a>,
    output: &'a mut [f64],
    decoded: Option<(DenseMatrix<f64>, DenseMatrix<f64>)>,
    result: Option<DenseMatrix<f64>>,
    phase: Phase,
    valid: bool,
}

impl<'a> DenseMatMulKernel<'a> {
    /// Creates a dense kernel over caller buffers
    pub fn new(inputs: DenseInputs<'a>, output: &'a mut [f64]) -> Self {
        Self {
            inputs,
            output,
            decoded: None,
            result: None,
            phase: Phase::Created,
            valid: false,
        }
    }
}

impl Kernel for DenseMatMulKernel<'_> {
    fn validate(&mut self) -> bool {
        assert_eq!(self.phase, Phase::Created, "validate must run first");
        self.phase = Phase::Validated;

        let i = &self.inputs;
        self.valid = i.cols_a == i.rows_b
            && i.a.len() == i.rows_a * i.cols_a
            && i.b.len() == i.rows_b * i.cols_b;
        self.valid
    }

    fn pre_process(&mut self) -> Result<()> {
        assert_eq!(self.phase, Phase::Validated, "pre_process must follow validate");
        assert!(self.valid, "pre_process after failed validation");
        self.phase = Phase::PreProcessed;

        let i = &self.inputs;
        self.decoded = Some((
            DenseMatrix::new(i.rows_a, i.cols_a, i.a.to_vec()),
            DenseMatrix::new(i.rows_b, i.cols_b, i.b.to_vec()),
        ));
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        assert_eq!(self.phase, Phase::PreProcessed, "run must follow pre_process");
        self.phase = Phase::Ran;

        let (a, b) = self.decoded.as_ref().expect("decoded in pre_process");
        self.result = Some(a.multiply(b)?);
        Ok(())
    }

    fn post_process(&mut self) -> Result<()> {
        assert_eq!(self.phase, Phase::Ran, "post_process must follow run");
        self.phase = Phase::Created;

        let result = self.result.as_ref().expect("result produced in run");
        let needed = result.data.len();
        if self.output.len() < needed {
            return Err(Error::CapacityExceeded {
                needed,
                capacity: self.output.len(),
            });
        }
        self.output[..needed].copy_from_slice(&result.data);
        Ok(())
    }
}

/// Drives a kernel through the full four-phase pipeline once
///
/// Returns `false` without touching the later phases when validation
/// fails; the caller's output buffers are left untouched in that case.
pub fn run_pipeline<K: Kernel>(kernel: &mut K) -> Result<bool> {
    if !kernel.validate() {
        return Ok(false);
    }
    kernel.pre_process()?;
    kernel.run()?;
    kernel.post_process()?;
    Ok(true)
}
