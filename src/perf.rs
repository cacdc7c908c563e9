//! Performance measurement harness for kernels
//!
//! Wraps a [`Kernel`] for repeated timed execution. `pipeline_run`
//! times the whole four-phase lifecycle per iteration; `task_run`
//! attributes only the `run` phase to the measurement. The same kernel
//! instance is driven through the pipeline each iteration; kernels are
//! re-invokable over identical inputs, so repetition does not corrupt
//! state.

use std::time::Instant;

use crate::error::Result;
use crate::task::Kernel;

/// Attributes controlling a measurement
pub struct PerfAttr {
    /// Number of timed iterations to average over
    pub num_runs: usize,

    /// Monotonic timer returning seconds; injectable for tests
    pub current_timer: Box<dyn Fn() -> f64>,
}

impl Default for PerfAttr {
    fn default() -> Self {
        let t0 = Instant::now();
        Self {
            num_runs: 10,
            current_timer: Box::new(move || t0.elapsed().as_secs_f64()),
        }
    }
}

/// Averaged timing produced by a measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfResults {
    /// Average seconds per iteration
    pub time_sec: f64,

    /// Iterations measured
    pub num_runs: usize,
}

/// Repeated-execution harness around a kernel
pub struct Perf<'a, K: Kernel> {
    kernel: &'a mut K,
}

impl<'a, K: Kernel> Perf<'a, K> {
    /// Creates a harness driving `kernel`
    pub fn new(kernel: &'a mut K) -> Self {
        Self { kernel }
    }

    /// Times the full validate / pre-process / run / post-process
    /// pipeline, repeated `attr.num_runs` times
    ///
    /// # Panics
    ///
    /// Panics if the kernel fails validation; the harness is for
    /// well-formed inputs.
    pub fn pipeline_run(&mut self, attr: &PerfAttr) -> Result<PerfResults> {
        let start = (attr.current_timer)();

        for _ in 0..attr.num_runs {
            assert!(self.kernel.validate(), "kernel failed validation");
            self.kernel.pre_process()?;
            self.kernel.run()?;
            self.kernel.post_process()?;
        }

        let elapsed = (attr.current_timer)() - start;
        Ok(PerfResults {
            time_sec: elapsed / attr.num_runs as f64,
            num_runs: attr.num_runs,
        })
    }

    /// Times only the `run` phase, repeated `attr.num_runs` times
    ///
    /// Validation and pre-processing happen outside the measured
    /// window; post-processing runs after it so the output buffers
    /// still hold the final result.
    ///
    /// # Panics
    ///
    /// Panics if the kernel fails validation.
    pub fn task_run(&mut self, attr: &PerfAttr) -> Result<PerfResults> {
        let mut elapsed = 0.0;

        for _ in 0..attr.num_runs {
            assert!(self.kernel.validate(), "kernel failed validation");
            self.kernel.pre_process()?;

            let start = (attr.current_timer)();
            self.kernel.run()?;
            elapsed += (attr.current_timer)() - start;

            self.kernel.post_process()?;
        }

        Ok(PerfResults {
            time_sec: elapsed / attr.num_runs as f64,
            num_runs: attr.num_runs,
        })
    }
}
