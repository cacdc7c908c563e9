//! Configuration for the distributed multiplication engine

/// Policy used to divide the output column range across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionPolicy {
    /// Contiguous blocks balanced by column count
    BlockColumns,
    /// Contiguous blocks balanced by estimated nonzero work,
    /// derived from B's column pointers
    BalancedWork,
}

/// Configuration for the distributed engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of workers in the group
    pub n_workers: usize,

    /// Row-count threshold below which the dense accumulator is used;
    /// above it, the sort-based accumulator avoids the O(rows) scratch
    pub dense_accum_threshold: usize,

    /// How the output column range is divided across workers
    pub partition_policy: PartitionPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            n_workers: num_cpus::get(),
            dense_accum_threshold: DENSE_ACCUM_THRESHOLD,
            partition_policy: PartitionPolicy::BlockColumns,
        }
    }
}

impl EngineConfig {
    /// Create a config for a fixed worker count, keeping other defaults
    pub fn for_workers(n_workers: usize) -> Self {
        Self {
            n_workers,
            ..Self::default()
        }
    }
}

/// Default row-count threshold for switching to the sort-based accumulator
pub const DENSE_ACCUM_THRESHOLD: usize = 4096;
