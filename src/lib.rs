//! propstore - serialized property store binary container codec
//!
//! The property store is a little-endian, length-framed container embedded
//! inside larger Windows artifacts (shell items, jump list entries, NTFS
//! extended attributes). Per [MS-PROPSTORE], it is a sequence of serialized
//! property storage structures that MUST be terminated by one whose Storage
//! Size field is 0x00000000.
//!
//! ```text
//! +------------------+
//! | Store Size       | (u32 LE, counts the whole image including itself)
//! +------------------+
//! | Storage Records  | (zero or more, each self-prefixed with a u32 LE size)
//! +------------------+
//! | Terminator       | (u32 LE, written as 0)
//! +------------------+
//! ```
//!
//! This crate handles the store-level framing only: validating the declared
//! size, walking size-prefixed records until the terminator, and packing the
//! sequence back into an exact byte image. A record's interior (its property
//! keys and values) is opaque here and belongs to whatever codec the caller
//! plugs into the [`RecordCodec`] seam.
//!
//! # Design Principles
//!
//! - Determinism over tolerance (malformed input is a hard failure)
//! - Exact byte images (re-serialization reproduces the parsed buffer)
//! - Record interiors stay uninterpreted at this layer
//! - The frame's size field drives the cursor, never the codec
//!
//! # Invariants Enforced
//!
//! - Store size equals 8 plus the sum of all record sizes
//! - Every record image length equals its declared size field
//! - The terminator is never materialized as a record

mod errors;
mod format;
mod reader;
mod record;
mod store;
mod writer;

pub use errors::{StoreError, StoreResult};
pub use format::WireStructure;
pub use reader::StoreReader;
pub use record::{RawRecordCodec, RecordCodec, RecordError, RecordResult, StorageRecord};
pub use store::PropertyStore;
pub use writer::StoreWriter;
