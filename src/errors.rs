//! Store framing error types.
//!
//! Every failure is detected synchronously and surfaced to the caller of
//! parse or serialize. There is no retry and no partial result: a malformed
//! buffer is a hard failure.

use thiserror::Error;

use crate::record::RecordError;

/// Result type for store framing operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store framing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The buffer cannot hold even an empty store (size field + terminator).
    #[error("property store buffer is {have} bytes, minimum is 8")]
    TooShort { have: usize },

    /// The declared store size exceeds the buffer length.
    #[error("declared store size {declared} exceeds buffer length {have}")]
    SizeMismatch { declared: u32, have: usize },

    /// The buffer ran out while scanning for the terminator.
    #[error("buffer underrun at offset {offset}: {remaining} bytes remain, need 4 for a size field")]
    BufferUnderrun { offset: usize, remaining: usize },

    /// The record codec failed on one record's interior.
    #[error("record at offset {offset}: {source}")]
    Record {
        offset: usize,
        source: RecordError,
    },

    /// A record's serialized image diverged from its declared size at write
    /// time. Without this check the divergence would shift every later
    /// offset in the image and corrupt adjacent records silently.
    #[error("record {index} serialized to {actual} bytes but declares {declared}")]
    EncodingMismatch {
        index: usize,
        declared: u32,
        actual: usize,
    },
}
