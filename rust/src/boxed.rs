//! Individually boxed heterogeneous elements
//!
//! Each value lives in its own heap allocation behind a tag, the way a
//! dynamically typed list holds numbers. Summation dispatches on the tag.

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::fixture::{Fixture, ELEMENT_BYTES};

/// Tag of [`Element::Long`] in the tagged byte form
pub const TAG_LONG: u32 = 0;
/// Tag of [`Element::Double`] in the tagged byte form
pub const TAG_DOUBLE: u32 = 1;

const TAG_BYTES: usize = 4;
const VALUE_BYTES: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Long(i64),
    Double(f64),
}

pub type BoxedList = Vec<Box<Element>>;

/// Integers first, then floats, one box per value
///
/// Rejects the same oversized fixtures as the byte buffers.
pub fn boxed_from_fixture(fixture: &Fixture) -> Result<BoxedList> {
    let elements = fixture.capacity_bytes()? / ELEMENT_BYTES;
    let mut list = Vec::with_capacity(elements);
    list.extend(fixture.longs().map(|v| Box::new(Element::Long(v))));
    list.extend(fixture.doubles().map(|v| Box::new(Element::Double(v))));
    Ok(list)
}

/// One summation pass over the list
#[inline]
pub fn sum_boxed(list: &[Box<Element>]) -> f64 {
    let mut sum = 0.0;
    for e in list {
        match **e {
            Element::Long(v) => sum += v as f64,
            Element::Double(v) => sum += v,
        }
    }
    sum
}

/// Tagged byte form: per element a `u32` LE tag then 8 LE value bytes.
///
/// Identical to the fixed-int bincode encoding of each [`Element`].
pub fn encode_tagged(list: &[Box<Element>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(list.len() * (TAG_BYTES + VALUE_BYTES));
    for e in list {
        match **e {
            Element::Long(v) => {
                out.extend_from_slice(&TAG_LONG.to_le_bytes());
                out.extend_from_slice(&v.to_le_bytes());
            }
            Element::Double(v) => {
                out.extend_from_slice(&TAG_DOUBLE.to_le_bytes());
                out.extend_from_slice(&v.to_bits().to_le_bytes());
            }
        }
    }
    out
}

/// Rebuild a boxed list from its tagged byte form
///
/// Any tag other than [`TAG_LONG`] or [`TAG_DOUBLE`] is rejected with
/// [`BenchError::UnexpectedElement`].
pub fn decode_tagged(bytes: &[u8]) -> Result<BoxedList> {
    let mut list = Vec::with_capacity(bytes.len() / (TAG_BYTES + VALUE_BYTES));
    let mut pos = 0;
    let mut index = 0;

    while pos < bytes.len() {
        let tag = u32::from_le_bytes(take::<TAG_BYTES>(bytes, pos)?);
        pos += TAG_BYTES;
        let raw = u64::from_le_bytes(take::<VALUE_BYTES>(bytes, pos)?);
        pos += VALUE_BYTES;

        let element = match tag {
            TAG_LONG => Element::Long(raw as i64),
            TAG_DOUBLE => Element::Double(f64::from_bits(raw)),
            _ => return Err(BenchError::UnexpectedElement { index, tag }),
        };
        list.push(Box::new(element));
        index += 1;
    }

    Ok(list)
}

#[inline]
fn take<const N: usize>(bytes: &[u8], pos: usize) -> Result<[u8; N]> {
    bytes
        .get(pos..pos + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(BenchError::BufferUnderflow {
            position: pos,
            needed: N,
            limit: bytes.len(),
        })
}
