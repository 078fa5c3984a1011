//! Storage record unit and the record codec seam.
//!
//! Each record inside the store is framed the same way:
//!
//! ```text
//! +------------------+
//! | Storage Size     | (u32 LE, counts the whole record including itself)
//! +------------------+
//! | Interior         | (variable, opaque at this layer)
//! +------------------+
//! ```
//!
//! The interior holds the record's own property encoding (version marker,
//! format GUID, property values). None of that is interpreted here:
//! [`StorageRecord`] captures the full image as an uninterpreted blob, and
//! callers that do understand the interior supply their own [`RecordCodec`].

use std::fmt;

use thiserror::Error;

use crate::errors::StoreResult;
use crate::format::{hex_preview, read_u32_le, WireStructure, MIN_RECORD_LEN, SIZE_FIELD_LEN};

/// Result type for record codec operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Record codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record image is below the 6-byte minimum.
    #[error("record is {have} bytes, minimum is 6")]
    TooSmall { have: usize },

    /// The record image cannot be represented by a u32 size field.
    #[error("record is {have} bytes, exceeding the u32 size field")]
    TooLarge { have: usize },

    /// The record's internal size prefix disagrees with its image length.
    #[error("record size prefix {declared} does not match its {actual}-byte image")]
    SizePrefixMismatch { declared: u32, actual: usize },

    /// The declared record size runs past the end of the buffer.
    #[error("record truncated: declared size {declared}, only {available} bytes available")]
    Truncated { declared: u32, available: usize },

    /// The codec produced a record larger than the frame it was parsed from.
    #[error("record spans {actual} bytes, exceeding its {declared}-byte frame")]
    FrameOverrun { declared: u32, actual: u32 },
}

/// One size-prefixed record, held as its exact serialized image.
///
/// The image always starts with the record's own 4-byte size field, and the
/// prefix is validated against the image length on construction, so a
/// `StorageRecord` can never disagree with itself about its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRecord {
    data: Vec<u8>,
}

impl StorageRecord {
    /// Wraps a complete record image, validating its framing.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TooSmall` for images under 6 bytes,
    /// `RecordError::TooLarge` for images a u32 cannot count, and
    /// `RecordError::SizePrefixMismatch` when the leading size field does
    /// not equal the image length.
    pub fn from_bytes(data: Vec<u8>) -> RecordResult<Self> {
        if data.len() < MIN_RECORD_LEN {
            return Err(RecordError::TooSmall { have: data.len() });
        }
        if data.len() > u32::MAX as usize {
            return Err(RecordError::TooLarge { have: data.len() });
        }
        let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        if declared as usize != data.len() {
            return Err(RecordError::SizePrefixMismatch {
                declared,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Builds a record around an opaque interior, prefixing the size field.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::TooSmall` for interiors under 2 bytes and
    /// `RecordError::TooLarge` when the framed image would not fit a u32.
    pub fn from_interior(interior: &[u8]) -> RecordResult<Self> {
        let total = interior.len() + SIZE_FIELD_LEN;
        if total < MIN_RECORD_LEN {
            return Err(RecordError::TooSmall { have: total });
        }
        if total > u32::MAX as usize {
            return Err(RecordError::TooLarge { have: total });
        }
        let mut data = Vec::with_capacity(total);
        data.extend_from_slice(&(total as u32).to_le_bytes());
        data.extend_from_slice(interior);
        Ok(Self { data })
    }

    /// The record's size in bytes, as carried by its size field.
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// The interior bytes after the size field.
    pub fn interior(&self) -> &[u8] {
        &self.data[SIZE_FIELD_LEN..]
    }

    /// The complete record image, size field included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl WireStructure for StorageRecord {
    fn wire_size(&self) -> u32 {
        self.size()
    }

    fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        format!(
            "StorageSize: {} (0x{:X}), Interior: {}",
            self.size(),
            self.size(),
            hex_preview(self.interior())
        )
    }
}

impl fmt::Display for StorageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Parses one record's interior from its position inside a store buffer.
///
/// This is the seam between the store framer and whatever understands the
/// record interior. The framer owns the frame: it has already read the
/// 4-byte size field at `offset` and will advance its cursor by that value
/// regardless of what the codec consumes.
pub trait RecordCodec {
    /// The record type this codec produces.
    type Record: WireStructure;

    /// Parses one record starting at `offset`.
    ///
    /// The 4 bytes at `offset` hold the record's declared size.
    /// Implementations must not read past `offset + size`.
    fn parse_one(&self, buf: &[u8], offset: usize) -> RecordResult<Self::Record>;
}

/// Codec that captures each record as an uninterpreted blob.
///
/// This is the default collaborator for callers that only need to carry
/// records through a parse/edit/serialize cycle without decoding them.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawRecordCodec;

impl RecordCodec for RawRecordCodec {
    type Record = StorageRecord;

    fn parse_one(&self, buf: &[u8], offset: usize) -> RecordResult<StorageRecord> {
        let declared = read_u32_le(buf, offset).ok_or(RecordError::Truncated {
            declared: 0,
            available: buf.len().saturating_sub(offset),
        })?;
        let image = offset
            .checked_add(declared as usize)
            .and_then(|end| buf.get(offset..end))
            .ok_or(RecordError::Truncated {
                declared,
                available: buf.len().saturating_sub(offset),
            })?;
        StorageRecord::from_bytes(image.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_image(interior: &[u8]) -> Vec<u8> {
        let mut image = ((interior.len() + 4) as u32).to_le_bytes().to_vec();
        image.extend_from_slice(interior);
        image
    }

    #[test]
    fn test_from_bytes_roundtrip() {
        let image = record_image(b"\x31\x53\x50\x53");
        let record = StorageRecord::from_bytes(image.clone()).unwrap();
        assert_eq!(record.size(), 8);
        assert_eq!(record.interior(), b"\x31\x53\x50\x53");
        assert_eq!(record.as_bytes(), image.as_slice());
    }

    #[test]
    fn test_from_bytes_rejects_undersized_image() {
        let result = StorageRecord::from_bytes(vec![0x05, 0x00, 0x00, 0x00, 0xAA]);
        assert_eq!(result.unwrap_err(), RecordError::TooSmall { have: 5 });
    }

    #[test]
    fn test_from_bytes_rejects_prefix_mismatch() {
        let mut image = record_image(b"ab");
        image[0] = 0x09;
        let result = StorageRecord::from_bytes(image);
        assert_eq!(
            result.unwrap_err(),
            RecordError::SizePrefixMismatch {
                declared: 9,
                actual: 6
            }
        );
    }

    #[test]
    fn test_from_interior_prefixes_size() {
        let record = StorageRecord::from_interior(b"abcd").unwrap();
        assert_eq!(record.size(), 8);
        assert_eq!(&record.as_bytes()[..4], &[0x08, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_from_interior_rejects_tiny_interior() {
        assert_eq!(
            StorageRecord::from_interior(b"a").unwrap_err(),
            RecordError::TooSmall { have: 5 }
        );
    }

    #[test]
    fn test_raw_codec_parses_at_offset() {
        let mut buf = vec![0xFF; 4];
        buf.extend_from_slice(&record_image(b"xy"));
        let record = RawRecordCodec.parse_one(&buf, 4).unwrap();
        assert_eq!(record.size(), 6);
        assert_eq!(record.interior(), b"xy");
    }

    #[test]
    fn test_raw_codec_rejects_truncated_record() {
        let mut image = record_image(b"abcdef");
        image.truncate(7);
        let result = RawRecordCodec.parse_one(&image, 0);
        assert_eq!(
            result.unwrap_err(),
            RecordError::Truncated {
                declared: 10,
                available: 7
            }
        );
    }

    #[test]
    fn test_wire_structure_matches_image() {
        let record = StorageRecord::from_interior(b"abcd").unwrap();
        assert_eq!(record.wire_size(), 8);
        assert_eq!(record.to_bytes().unwrap(), record.as_bytes());
    }

    #[test]
    fn test_describe_reports_size_and_interior() {
        let record = StorageRecord::from_interior(&[0xAB, 0xCD]).unwrap();
        let text = record.describe();
        assert!(text.contains("StorageSize: 6 (0x6)"));
        assert!(text.contains("0xabcd"));
    }
}
