//! Typed little-endian reads at explicit byte offsets
//!
//! No cursor: every read names its offset. Bounds are checked once per read,
//! then the 8 bytes are reinterpreted in place with an unaligned load.

use crate::error::{BenchError, Result};
use crate::fixture::ELEMENT_BYTES;

#[derive(Debug, Clone, Copy)]
pub struct OffsetView<'a> {
    bytes: &'a [u8],
}

impl<'a> OffsetView<'a> {
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline(always)]
    fn check(&self, offset: usize) -> Result<()> {
        match offset.checked_add(ELEMENT_BYTES) {
            Some(end) if end <= self.bytes.len() => Ok(()),
            _ => Err(BenchError::OutOfBounds {
                offset,
                width: ELEMENT_BYTES,
                len: self.bytes.len(),
            }),
        }
    }

    #[inline(always)]
    fn load_u64(&self, offset: usize) -> Result<u64> {
        self.check(offset)?;
        // SAFETY: offset..offset+8 checked against the slice above.
        let raw = unsafe {
            std::ptr::read_unaligned(self.bytes.as_ptr().add(offset) as *const u64)
        };
        Ok(u64::from_le(raw))
    }

    #[inline(always)]
    pub fn i64_at(&self, offset: usize) -> Result<i64> {
        Ok(self.load_u64(offset)? as i64)
    }

    #[inline(always)]
    pub fn f64_at(&self, offset: usize) -> Result<f64> {
        Ok(f64::from_bits(self.load_u64(offset)?))
    }
}

/// One summation pass over `longs_count` integers starting at `long_base`
/// and `doubles_count` floats starting at `double_base`
#[inline]
pub fn sum_offsets(
    view: OffsetView<'_>,
    long_base: usize,
    double_base: usize,
    longs_count: usize,
    doubles_count: usize,
) -> Result<f64> {
    let mut sum = 0.0;
    for i in 0..longs_count {
        sum += view.i64_at(long_base + i * ELEMENT_BYTES)? as f64;
    }
    for i in 0..doubles_count {
        sum += view.f64_at(double_base + i * ELEMENT_BYTES)?;
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::heap_from_fixture;
    use crate::fixture::Fixture;

    #[test]
    fn test_reads_match_written_values() {
        let fixture = Fixture::new(3, 3);
        let heap = heap_from_fixture(&fixture).unwrap();
        let view = OffsetView::new(heap.readable());

        for (i, v) in fixture.longs().enumerate() {
            assert_eq!(view.i64_at(i * 8).unwrap(), v);
        }
        let base = fixture.doubles_offset();
        for (i, v) in fixture.doubles().enumerate() {
            assert_eq!(view.f64_at(base + i * 8).unwrap().to_bits(), v.to_bits());
        }
    }

    #[test]
    fn test_unaligned_offset() {
        let mut bytes = vec![0u8; 9];
        bytes[1..].copy_from_slice(&(-3i64).to_le_bytes());
        assert_eq!(OffsetView::new(&bytes).i64_at(1).unwrap(), -3);
    }

    #[test]
    fn test_out_of_bounds() {
        let bytes = [0u8; 12];
        let view = OffsetView::new(&bytes);
        assert_eq!(view.len(), 12);
        assert!(view.f64_at(4).is_ok());
        match view.f64_at(5) {
            Err(BenchError::OutOfBounds { offset, width, len }) => {
                assert_eq!((offset, width, len), (5, 8, 12));
            }
            other => panic!("expected out of bounds, got {other:?}"),
        }
        assert!(view.i64_at(usize::MAX).is_err());
    }

    #[test]
    fn test_sum_with_empty_sections() {
        let fixture = Fixture::new(4, 0);
        let heap = heap_from_fixture(&fixture).unwrap();
        let view = OffsetView::new(heap.readable());
        let sum = sum_offsets(view, 0, fixture.doubles_offset(), 4, 0).unwrap();
        assert_eq!(sum, 10.0);

        let empty = OffsetView::new(&[]);
        assert!(empty.is_empty());
        assert_eq!(sum_offsets(empty, 0, 0, 0, 0).unwrap(), 0.0);
    }
}
