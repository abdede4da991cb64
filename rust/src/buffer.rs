//! Cursor-based byte buffer with little-endian typed reads and writes
//!
//! A buffer has a fixed capacity, a `position` cursor and a `limit`.
//! Writes advance the cursor up to the capacity; `flip` turns the written
//! prefix into the readable region; reads advance the cursor up to the
//! limit. The backing storage is generic so the same code serves the
//! heap-allocated and the native-region variants.

use crate::error::{BenchError, Result};
use crate::fixture::Fixture;
use crate::native::NativeRegion;

/// Buffer backed by a boxed slice from the global allocator
pub type HeapBuffer = ByteBuffer<Box<[u8]>>;

/// Buffer backed by a fixed, aligned native region
pub type DirectBuffer = ByteBuffer<NativeRegion>;

#[derive(Debug)]
pub struct ByteBuffer<S> {
    storage: S,
    position: usize,
    limit: usize,
}

impl HeapBuffer {
    pub fn allocate(capacity: usize) -> Self {
        Self::with_storage(vec![0u8; capacity].into_boxed_slice())
    }
}

impl DirectBuffer {
    pub fn allocate_direct(capacity: usize) -> Self {
        Self::with_storage(NativeRegion::zeroed(capacity))
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> ByteBuffer<S> {
    /// Wrap storage in write mode: position 0, limit = capacity
    pub fn with_storage(storage: S) -> Self {
        let limit = storage.as_ref().len();
        Self {
            storage,
            position: 0,
            limit,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Move the cursor; fails if `position` is past the limit
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(BenchError::BufferUnderflow {
                position,
                needed: 0,
                limit: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Reset the cursor to the start, keeping the limit
    #[inline]
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Switch from writing to reading: limit = position, position = 0
    #[inline]
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// The readable region `[0, limit)`
    #[inline]
    pub fn readable(&self) -> &[u8] {
        &self.storage.as_ref()[..self.limit]
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.position + bytes.len();
        if end > self.limit {
            return Err(BenchError::BufferOverflow {
                position: self.position,
                needed: bytes.len(),
                capacity: self.limit,
            });
        }
        self.storage.as_mut()[self.position..end].copy_from_slice(bytes);
        self.position = end;
        Ok(())
    }

    #[inline]
    pub fn put_i64(&mut self, v: i64) -> Result<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    #[inline]
    pub fn put_f64(&mut self, v: f64) -> Result<()> {
        self.write_bytes(&v.to_bits().to_le_bytes())
    }

    #[inline(always)]
    fn read_8(&mut self) -> Result<[u8; 8]> {
        let end = self.position + 8;
        if end > self.limit {
            return Err(BenchError::BufferUnderflow {
                position: self.position,
                needed: 8,
                limit: self.limit,
            });
        }
        let b = &self.storage.as_ref()[self.position..end];
        self.position = end;
        Ok([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    #[inline(always)]
    pub fn get_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_8()?))
    }

    #[inline(always)]
    pub fn get_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(u64::from_le_bytes(self.read_8()?)))
    }

    /// Write the fixture (integers, then floats) and flip for reading
    pub fn fill(&mut self, fixture: &Fixture) -> Result<()> {
        for v in fixture.longs() {
            self.put_i64(v)?;
        }
        for v in fixture.doubles() {
            self.put_f64(v)?;
        }
        self.flip();
        Ok(())
    }
}

/// Allocate a heap buffer sized for `fixture` and fill it
pub fn heap_from_fixture(fixture: &Fixture) -> Result<HeapBuffer> {
    let mut buf = HeapBuffer::allocate(fixture.capacity_bytes()?);
    buf.fill(fixture)?;
    Ok(buf)
}

/// Allocate a direct buffer sized for `fixture` and fill it
pub fn direct_from_fixture(fixture: &Fixture) -> Result<DirectBuffer> {
    let mut buf = DirectBuffer::allocate_direct(fixture.capacity_bytes()?);
    buf.fill(fixture)?;
    Ok(buf)
}

/// One summation pass reading from the current cursor position
///
/// The caller resets the cursor before each pass.
#[inline]
pub fn sum_sequential<S: AsRef<[u8]> + AsMut<[u8]>>(
    buf: &mut ByteBuffer<S>,
    longs_count: usize,
    doubles_count: usize,
) -> Result<f64> {
    let mut sum = 0.0;
    for _ in 0..longs_count {
        sum += buf.get_i64()? as f64;
    }
    for _ in 0..doubles_count {
        sum += buf.get_f64()?;
    }
    Ok(sum)
}
