//! Error type shared by every stage of a benchmark run

use thiserror::Error;

/// Errors raised while building, summing or verifying a representation
#[derive(Debug, Error)]
pub enum BenchError {
    /// A representation's grand total diverged from the analytic total
    #[error("{label} sum mismatch: expected {expected}, got {actual}")]
    Mismatch {
        label: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("unexpected element type at index {index}: tag {tag}")]
    UnexpectedElement { index: usize, tag: u32 },

    /// Sequential read past the buffer limit
    #[error("buffer underflow: need {needed} bytes at position {position}, limit {limit}")]
    BufferUnderflow {
        position: usize,
        needed: usize,
        limit: usize,
    },

    /// Sequential write past the buffer capacity
    #[error("buffer overflow: need {needed} bytes at position {position}, capacity {capacity}")]
    BufferOverflow {
        position: usize,
        needed: usize,
        capacity: usize,
    },

    #[error("offset {offset} (+{width}) out of bounds for {len}-byte view")]
    OutOfBounds { offset: usize, width: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_representation() {
        let err = BenchError::Mismatch {
            label: "Direct",
            expected: 7.0,
            actual: 6.5,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Direct sum mismatch"), "{msg}");
        assert!(msg.contains("expected 7"));
    }

    #[test]
    fn test_unexpected_element_message() {
        let err = BenchError::UnexpectedElement { index: 3, tag: 9 };
        assert_eq!(err.to_string(), "unexpected element type at index 3: tag 9");
    }
}
