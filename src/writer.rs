//! Store serialization: exact byte-image reassembly.
//!
//! The store size is recomputed from the record list on every call, never
//! cached, and the size field is written before any record. `finish` writes
//! the 4-byte terminator, so the finished image is always exactly the
//! declared number of bytes.

use tracing::debug;

use crate::errors::{StoreError, StoreResult};
use crate::format::WireStructure;

/// Builds a serialized store image record by record.
pub struct StoreWriter {
    buf: Vec<u8>,
    index: usize,
}

impl StoreWriter {
    /// Starts an image of `store_size` total bytes and writes the size
    /// field.
    pub fn new(store_size: u32) -> Self {
        let mut buf = Vec::with_capacity(store_size as usize);
        buf.extend_from_slice(&store_size.to_le_bytes());
        Self { buf, index: 0 }
    }

    /// Appends one record at the cursor.
    ///
    /// The record's image length is checked against its declared size
    /// before anything is copied.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EncodingMismatch` when the two disagree, and
    /// passes through any failure from the record's own serialization.
    pub fn append<R: WireStructure>(&mut self, record: &R) -> StoreResult<()> {
        let declared = record.wire_size();
        let image = record.to_bytes()?;
        if image.len() != declared as usize {
            return Err(StoreError::EncodingMismatch {
                index: self.index,
                declared,
                actual: image.len(),
            });
        }
        self.buf.extend_from_slice(&image);
        self.index += 1;
        Ok(())
    }

    /// Writes the terminator field and returns the finished image.
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(&0u32.to_le_bytes());
        debug!(records = self.index, bytes = self.buf.len(), "property store serialized");
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StorageRecord;

    #[test]
    fn test_empty_image_is_size_field_plus_terminator() {
        let image = StoreWriter::new(8).finish();
        assert_eq!(image, [0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_records_are_packed_contiguously() {
        let a = StorageRecord::from_interior(b"ab").unwrap();
        let b = StorageRecord::from_interior(b"cdef").unwrap();

        let mut writer = StoreWriter::new(8 + 6 + 8);
        writer.append(&a).unwrap();
        writer.append(&b).unwrap();
        let image = writer.finish();

        assert_eq!(image.len(), 22);
        assert_eq!(&image[0..4], &[22, 0, 0, 0]);
        assert_eq!(&image[4..10], a.as_bytes());
        assert_eq!(&image[10..18], b.as_bytes());
        assert_eq!(&image[18..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_size_lie_is_rejected_before_corrupting_the_image() {
        /// Declares ten bytes, serializes six.
        struct LyingRecord;

        impl WireStructure for LyingRecord {
            fn wire_size(&self) -> u32 {
                10
            }

            fn to_bytes(&self) -> StoreResult<Vec<u8>> {
                Ok(vec![0; 6])
            }

            fn describe(&self) -> String {
                String::from("LyingRecord")
            }
        }

        let mut writer = StoreWriter::new(18);
        let err = writer.append(&LyingRecord).unwrap_err();
        assert_eq!(
            err,
            StoreError::EncodingMismatch {
                index: 0,
                declared: 10,
                actual: 6
            }
        );
    }
}
