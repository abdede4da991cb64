//! Canonical values under test
//!
//! A fixture is `longs_count` integers `1..=L` followed by `doubles_count`
//! floats `i + 0.5` for `i` in `1..=D`. Every representation is populated
//! from the same fixture, in that order.

use crate::error::{BenchError, Result};

/// Width of one encoded element (i64 or f64)
pub const ELEMENT_BYTES: usize = 8;

/// Largest byte region an allocation may request
pub const MAX_CAPACITY_BYTES: usize = isize::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub longs_count: usize,
    pub doubles_count: usize,
}

impl Fixture {
    pub fn new(longs_count: usize, doubles_count: usize) -> Self {
        Self {
            longs_count,
            doubles_count,
        }
    }

    /// Integer values `1..=longs_count`
    #[inline]
    pub fn longs(&self) -> impl Iterator<Item = i64> {
        1..=self.longs_count as i64
    }

    /// Float values `i + 0.5` for `i` in `1..=doubles_count`
    ///
    /// Every value is exactly representable in binary64 for the sizes a
    /// benchmark can allocate.
    #[inline]
    pub fn doubles(&self) -> impl Iterator<Item = f64> {
        (1..=self.doubles_count).map(|i| i as f64 + 0.5)
    }

    /// Bytes needed for the packed little-endian layout
    ///
    /// Fails when the layout cannot be addressed by a single allocation.
    pub fn capacity_bytes(&self) -> Result<usize> {
        self.longs_count
            .checked_add(self.doubles_count)
            .and_then(|n| n.checked_mul(ELEMENT_BYTES))
            .filter(|&bytes| bytes <= MAX_CAPACITY_BYTES)
            .ok_or_else(|| {
                BenchError::InvalidConfig(format!(
                    "{} elements do not fit in one buffer",
                    self.descriptor()
                ))
            })
    }

    /// Byte offset where the float section starts
    ///
    /// Saturates for fixtures whose capacity is rejected; offset reads at
    /// that position fail their bounds check.
    #[inline]
    pub fn doubles_offset(&self) -> usize {
        self.longs_count.saturating_mul(ELEMENT_BYTES)
    }

    /// Size descriptor used in report rows, `"<longs>/<doubles>"`
    pub fn descriptor(&self) -> String {
        format!("{}/{}", self.longs_count, self.doubles_count)
    }

    /// Analytic sum of one pass over the fixture
    pub fn expected_sum(&self) -> f64 {
        expected_sum(self.longs_count, self.doubles_count)
    }
}

/// `L(L+1)/2 + D(D+1)/2 + 0.5*D`, computed in integers before the final
/// conversion so it stays exact.
///
/// `u128` holds `n(n+1)` for every `usize` count, so this never overflows.
pub fn expected_sum(longs_count: usize, doubles_count: usize) -> f64 {
    let l = longs_count as u128;
    let d = doubles_count as u128;
    let sum_longs = l * (l + 1) / 2;
    let sum_ints = d * (d + 1) / 2;
    (sum_longs + sum_ints) as f64 + d as f64 * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_two_by_two() {
        let f = Fixture::new(2, 2);
        assert_eq!(f.longs().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(f.doubles().collect::<Vec<_>>(), vec![1.5, 2.5]);
        assert_eq!(f.expected_sum(), 7.0);
        assert_eq!(f.capacity_bytes().unwrap(), 32);
        assert_eq!(f.doubles_offset(), 16);
        assert_eq!(f.descriptor(), "2/2");
    }

    #[test]
    fn test_pure_integer_sum() {
        assert_eq!(expected_sum(4, 0), 10.0);
        assert_eq!(Fixture::new(4, 0).doubles().count(), 0);
    }

    #[test]
    fn test_empty_fixture() {
        let f = Fixture::new(0, 0);
        assert_eq!(f.expected_sum(), 0.0);
        assert_eq!(f.capacity_bytes().unwrap(), 0);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_expected_sum_large_counts() {
        let l = u32::MAX as usize + 10;
        let n = l as u128;
        assert_eq!(expected_sum(l, 0), (n * (n + 1) / 2) as f64);

        let max = usize::MAX as u128;
        let sum = expected_sum(usize::MAX, usize::MAX);
        assert!(sum.is_finite());
        assert_eq!(sum, (max * (max + 1)) as f64 + max as f64 * 0.5);
    }

    #[test]
    fn test_capacity_overflow_rejected() {
        let huge = Fixture::new(1 << (usize::BITS - 3), 1 << (usize::BITS - 3));
        assert!(matches!(huge.capacity_bytes(), Err(BenchError::InvalidConfig(_))));

        let wraps = Fixture::new(usize::MAX, 1);
        assert!(wraps.capacity_bytes().is_err());
        assert_eq!(wraps.doubles_offset(), usize::MAX);

        let past_isize = Fixture::new(MAX_CAPACITY_BYTES / ELEMENT_BYTES + 1, 0);
        assert!(past_isize.capacity_bytes().is_err());

        let at_limit = Fixture::new(MAX_CAPACITY_BYTES / ELEMENT_BYTES, 0);
        assert_eq!(
            at_limit.capacity_bytes().unwrap(),
            MAX_CAPACITY_BYTES / ELEMENT_BYTES * ELEMENT_BYTES
        );
    }

    #[test]
    fn test_expected_sum_matches_direct_sum() {
        for l in 0..40 {
            for d in 0..40 {
                let f = Fixture::new(l, d);
                let direct: f64 =
                    f.longs().map(|v| v as f64).sum::<f64>() + f.doubles().sum::<f64>();
                assert_eq!(direct, f.expected_sum(), "{l}/{d}");
            }
        }
    }
}
