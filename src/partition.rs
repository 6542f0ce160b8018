//! Balanced partitioning of ordered work across a worker group
//!
//! Splits `n` ordered work items across `k` workers. Every worker gets
//! `n / k` items and the first `n % k` workers get one extra, so slice lengths
//! never differ by more than one. Slices are contiguous and appear in the
//! original order, which keeps per-worker seed derivation reproducible.
//!
//! # Example
//!
//! ```
//! use scatter_reduce::partition::partition;
//!
//! let part = partition(10, 4).unwrap();
//! let lens: Vec<u64> = part.slices().iter().map(|s| s.len).collect();
//! assert_eq!(lens, vec![3, 3, 2, 2]);
//!
//! let items = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
//! let views = part.split(&items).unwrap();
//! assert_eq!(views[1], &["d", "e", "f"]);
//! ```

use crate::error::{RoundError, RoundResult};
use std::ops::Range;

/// One worker's share of the input
///
/// Covers `[offset, offset + len)` of the original ordered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    /// Worker index this slice is assigned to
    pub index: usize,
    /// Position of the first item in the original input
    pub offset: u64,
    /// Number of items in the slice
    pub len: u64,
}

impl Slice {
    /// Item positions covered by this slice
    pub fn range(&self) -> Range<u64> {
        self.offset..self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Boundary table for one round
///
/// Holds only offsets and lengths; items themselves are borrowed through
/// [`Partition::split`] rather than copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    total: u64,
    slices: Vec<Slice>,
}

impl Partition {
    /// Number of items partitioned
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of slices (equals the worker count)
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Borrow each worker's sub-slice of `items`
    ///
    /// `items` must be the same ordered input the partition was built for.
    pub fn split<'a, T>(&self, items: &'a [T]) -> RoundResult<Vec<&'a [T]>> {
        if items.len() as u64 != self.total {
            return Err(RoundError::invalid(format!(
                "partition covers {} items but {} were supplied",
                self.total,
                items.len()
            )));
        }

        Ok(self
            .slices
            .iter()
            .map(|s| &items[s.offset as usize..(s.offset + s.len) as usize])
            .collect())
    }
}

/// Partition `n` ordered items across `k` workers
///
/// Fails with `InvalidArgument` when `k == 0`.
pub fn partition(n: u64, k: u32) -> RoundResult<Partition> {
    if k == 0 {
        return Err(RoundError::invalid("worker count must be at least 1"));
    }

    let k64 = k as u64;
    let base = n / k64;
    let remainder = n % k64;

    let mut slices = Vec::with_capacity(k as usize);
    let mut offset = 0u64;
    for i in 0..k64 {
        let len = if i < remainder { base + 1 } else { base };
        slices.push(Slice {
            index: i as usize,
            offset,
            len,
        });
        offset += len;
    }

    debug_assert_eq!(offset, n);

    Ok(Partition { total: n, slices })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_rejected() {
        let err = partition(10, 0).unwrap_err();
        assert!(matches!(err, RoundError::InvalidArgument(_)));
    }

    #[test]
    fn test_remainder_goes_to_first_slices() {
        let part = partition(11, 4).unwrap();
        let lens: Vec<u64> = part.slices().iter().map(|s| s.len).collect();
        assert_eq!(lens, vec![3, 3, 3, 2]);

        let offsets: Vec<u64> = part.slices().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_more_workers_than_items() {
        let part = partition(2, 5).unwrap();
        assert_eq!(part.len(), 5);
        let lens: Vec<u64> = part.slices().iter().map(|s| s.len).collect();
        assert_eq!(lens, vec![1, 1, 0, 0, 0]);
        assert!(part.slices()[4].is_empty());
    }

    #[test]
    fn test_empty_input() {
        let part = partition(0, 3).unwrap();
        assert_eq!(part.total(), 0);
        assert!(part.slices().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_partition_properties_grid() {
        for n in 0..60u64 {
            for k in 1..12u32 {
                let part = partition(n, k).unwrap();
                assert_eq!(part.len(), k as usize);

                let sum: u64 = part.slices().iter().map(|s| s.len).sum();
                assert_eq!(sum, n, "n={} k={}", n, k);

                let max = part.slices().iter().map(|s| s.len).max().unwrap();
                let min = part.slices().iter().map(|s| s.len).min().unwrap();
                assert!(max - min <= 1, "n={} k={} max={} min={}", n, k, max, min);

                // Contiguous cover in order
                let mut expected = 0;
                for (i, s) in part.slices().iter().enumerate() {
                    assert_eq!(s.index, i);
                    assert_eq!(s.offset, expected);
                    expected = s.range().end;
                }
                assert_eq!(expected, n);
            }
        }
    }

    #[test]
    fn test_split_concatenation_matches_input() {
        let items: Vec<String> = (0..23).map(|i| format!("f{}.txt", i)).collect();
        for k in 1..9 {
            let part = partition(items.len() as u64, k).unwrap();
            let views = part.split(&items).unwrap();
            let joined: Vec<String> = views.iter().flat_map(|v| v.iter().cloned()).collect();
            assert_eq!(joined, items);
        }
    }

    #[test]
    fn test_split_length_mismatch() {
        let part = partition(4, 2).unwrap();
        let items = [1, 2, 3];
        assert!(part.split(&items).is_err());
    }
}
