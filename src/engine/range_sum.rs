//! Integer range summation engine
//!
//! Sums a contiguous run of integers in closed form. Intermediate products are
//! taken in `u128`; the result must still fit in `u64`.

/// Sum of the `len` integers `first, first + 1, ..., first + len - 1`
///
/// Returns `None` if the sum does not fit in a `u64`.
pub fn sum_range_local(first: u64, len: u64) -> Option<u64> {
    if len == 0 {
        return Some(0);
    }

    let first = first as u128;
    let len = len as u128;
    let head = len.checked_mul(first)?;
    let tail = len.checked_mul(len - 1)? / 2;
    let sum = head.checked_add(tail)?;
    u64::try_from(sum).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range() {
        assert_eq!(sum_range_local(10, 0), Some(0));
    }

    #[test]
    fn test_matches_iterative_sum() {
        for first in [0u64, 1, 7, 1000] {
            for len in 0..50u64 {
                let expected: u64 = (first..first + len).sum();
                assert_eq!(sum_range_local(first, len), Some(expected));
            }
        }
    }

    #[test]
    fn test_gauss() {
        // 1 + 2 + ... + 10_000_000
        assert_eq!(sum_range_local(1, 10_000_000), Some(50_000_005_000_000));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(sum_range_local(u64::MAX, 2), None);
        assert_eq!(sum_range_local(u64::MAX, 1), Some(u64::MAX));
    }

    #[test]
    fn test_overflow_beyond_u128_intermediates() {
        assert_eq!(sum_range_local(u64::MAX, u64::MAX), None);
        assert_eq!(sum_range_local(0, u64::MAX), None);
        assert_eq!(sum_range_local(1 << 63, 1 << 62), None);
    }
}
