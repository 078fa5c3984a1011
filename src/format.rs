//! Shared wire-format contract for store structures.

use crate::errors::StoreResult;

/// Byte length of a size field (store size, record size, terminator).
pub const SIZE_FIELD_LEN: usize = 4;

/// Framing overhead of the store itself: the store-size field plus the
/// unstored terminator field that follows the last record.
pub const STORE_FRAMING_LEN: u32 = 8;

/// Largest size-field value still treated as a terminator.
///
/// The format prose defines the terminator as a size field of 0x00000000,
/// but a real record can never be smaller than 6 bytes (its own size field
/// plus a non-empty interior), so any value in 1..=5 is swallowed as a
/// terminator as well.
pub const TERMINATOR_MAX: u32 = 5;

/// Smallest valid record image: the 4-byte size field plus a 2-byte interior.
pub const MIN_RECORD_LEN: usize = 6;

/// Serialization contract shared by the store container and every record
/// type it can hold.
pub trait WireStructure {
    /// Exact serialized length in bytes.
    fn wire_size(&self) -> u32;

    /// Serialize to the byte image; the length must equal [`wire_size`].
    ///
    /// [`wire_size`]: WireStructure::wire_size
    fn to_bytes(&self) -> StoreResult<Vec<u8>>;

    /// Human-oriented diagnostic dump. Purely derived, no effect on the
    /// binary contract.
    fn describe(&self) -> String;
}

/// Reads a little-endian u32 at `offset`, or `None` if fewer than 4 bytes
/// remain.
pub(crate) fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset.checked_add(SIZE_FIELD_LEN)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Formats a short hex preview of a byte run for diagnostics.
pub(crate) fn hex_preview(bytes: &[u8]) -> String {
    const PREVIEW_LEN: usize = 16;
    if bytes.len() <= PREVIEW_LEN {
        format!("0x{}", hex::encode(bytes))
    } else {
        format!("0x{}.. ({} bytes)", hex::encode(&bytes[..PREVIEW_LEN]), bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_le() {
        let buf = [0x0E, 0x00, 0x00, 0x00, 0xFF];
        assert_eq!(read_u32_le(&buf, 0), Some(14));
        assert_eq!(read_u32_le(&buf, 1), Some(0xFF00_0000));
        assert_eq!(read_u32_le(&buf, 2), None);
        assert_eq!(read_u32_le(&buf, usize::MAX), None);
    }

    #[test]
    fn test_hex_preview_short_run_is_complete() {
        assert_eq!(hex_preview(&[0xAB, 0xCD]), "0xabcd");
    }

    #[test]
    fn test_hex_preview_long_run_is_truncated() {
        let preview = hex_preview(&[0x11; 40]);
        assert!(preview.starts_with("0x1111"));
        assert!(preview.ends_with("(40 bytes)"));
    }
}
