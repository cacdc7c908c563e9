//! Column partitioning across workers
//!
//! Every worker computes its own assignment from `(total_cols,
//! worker_count, rank)` alone; no coordinator message is needed and all
//! workers agree by construction. Ranges are contiguous, disjoint,
//! rank-ordered, and exhaustive. When there are more workers than
//! columns the trailing workers receive empty ranges and still
//! participate in every collective.

/// A half-open range of output columns assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// First column owned by the worker
    pub start: usize,
    /// One past the last column owned by the worker
    pub end: usize,
}

impl ColumnRange {
    /// Number of columns in the range
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the range holds no columns
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Computes the column block owned by `rank` under the block policy
///
/// The first `total_cols % worker_count` workers receive one extra
/// column each.
///
/// # Panics
///
/// Panics if `worker_count` is zero or `rank` is out of range.
pub fn partition(total_cols: usize, worker_count: usize, rank: usize) -> ColumnRange {
    assert!(worker_count > 0, "worker_count must be positive");
    assert!(rank < worker_count, "rank out of range");

    let base = total_cols / worker_count;
    let remainder = total_cols % worker_count;

    let start = rank * base + rank.min(remainder);
    let len = base + usize::from(rank < remainder);

    ColumnRange {
        start,
        end: start + len,
    }
}

/// Computes all ranges under the work-balanced policy
///
/// Cut points are placed where B's nonzero prefix sum crosses equal
/// shares of the total, approximating equal multiply-accumulate work per
/// worker while keeping ranges contiguous and rank-ordered. Falls back
/// to the block policy when B has no nonzeros. Deterministic given
/// `col_ptr`, so workers that share B's column pointers agree without
/// further communication.
pub fn partition_by_work(col_ptr: &[usize], worker_count: usize) -> Vec<ColumnRange> {
    assert!(worker_count > 0, "worker_count must be positive");
    assert!(!col_ptr.is_empty(), "col_ptr must have at least one entry");

    let total_cols = col_ptr.len() - 1;
    let total_nnz = col_ptr[total_cols];

    if total_nnz == 0 {
        return (0..worker_count)
            .map(|rank| partition(total_cols, worker_count, rank))
            .collect();
    }

    let mut ranges = Vec::with_capacity(worker_count);
    let mut start = 0;

    for rank in 0..worker_count {
        let target = total_nnz * (rank + 1) / worker_count;
        // Smallest end with col_ptr[end] >= target; monotone in rank
        let end = if rank + 1 == worker_count {
            total_cols
        } else {
            col_ptr.partition_point(|&p| p < target).min(total_cols)
        };
        let end = end.max(start);
        ranges.push(ColumnRange { start, end });
        start = end;
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tiles(ranges: &[ColumnRange], total_cols: usize) {
        let mut expected = 0;
        for r in ranges {
            assert_eq!(r.start, expected);
            assert!(r.end >= r.start);
            expected = r.end;
        }
        assert_eq!(expected, total_cols);
    }

    #[test]
    fn test_partition_even() {
        let ranges: Vec<_> = (0..4).map(|r| partition(8, 4, r)).collect();
        assert_tiles(&ranges, 8);
        for r in &ranges {
            assert_eq!(r.len(), 2);
        }
    }

    #[test]
    fn test_partition_remainder_goes_to_leading_ranks() {
        let ranges: Vec<_> = (0..4).map(|r| partition(10, 4, r)).collect();
        assert_tiles(&ranges, 10);
        assert_eq!(ranges[0].len(), 3);
        assert_eq!(ranges[1].len(), 3);
        assert_eq!(ranges[2].len(), 2);
        assert_eq!(ranges[3].len(), 2);
    }

    #[test]
    fn test_more_workers_than_columns() {
        let ranges: Vec<_> = (0..5).map(|r| partition(2, 5, r)).collect();
        assert_tiles(&ranges, 2);
        assert_eq!(ranges[0].len(), 1);
        assert_eq!(ranges[1].len(), 1);
        assert!(ranges[2].is_empty());
        assert!(ranges[3].is_empty());
        assert!(ranges[4].is_empty());
    }

    #[test]
    fn test_zero_columns() {
        let ranges: Vec<_> = (0..3).map(|r| partition(0, 3, r)).collect();
        assert_tiles(&ranges, 0);
        assert!(ranges.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_single_worker_owns_everything() {
        let r = partition(7, 1, 0);
        assert_eq!(r, ColumnRange { start: 0, end: 7 });
    }

    #[test]
    fn test_partition_by_work_balances_nnz() {
        // Column nnz: 6, 1, 1, 1, 1 -> first worker should not also
        // swallow the light columns
        let col_ptr = vec![0, 6, 7, 8, 9, 10];
        let ranges = partition_by_work(&col_ptr, 2);
        assert_tiles(&ranges, 5);
        assert_eq!(ranges[0], ColumnRange { start: 0, end: 1 });
        assert_eq!(ranges[1], ColumnRange { start: 1, end: 5 });
    }

    #[test]
    fn test_partition_by_work_empty_matrix_falls_back() {
        let col_ptr = vec![0, 0, 0, 0];
        let ranges = partition_by_work(&col_ptr, 2);
        assert_tiles(&ranges, 3);
        assert_eq!(ranges[0].len(), 2);
        assert_eq!(ranges[1].len(), 1);
    }

    #[test]
    fn test_partition_by_work_more_workers_than_columns() {
        let col_ptr = vec![0, 2, 4];
        let ranges = partition_by_work(&col_ptr, 4);
        assert_tiles(&ranges, 2);
        assert_eq!(ranges.len(), 4);
    }
}
