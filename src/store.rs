//! The property store container.
//!
//! A [`PropertyStore`] owns an ordered sequence of records; insertion order
//! is on-disk order. It is an ordinary mutable collection with no interior
//! locking. Callers that share one instance across threads serialize access
//! themselves.

use std::fmt;
use std::slice;

use tracing::debug;

use crate::errors::StoreResult;
use crate::format::{WireStructure, STORE_FRAMING_LEN};
use crate::reader::StoreReader;
use crate::record::{RawRecordCodec, RecordCodec, StorageRecord};
use crate::writer::StoreWriter;

/// Ordered sequence of storage records with store-level framing.
///
/// Parsing populates the sequence from a byte buffer; an empty store can
/// also be built up programmatically and serialized. The store size is
/// always derived from the current record list, so list mutations are
/// reflected in the next serialization with no bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyStore<R = StorageRecord> {
    records: Vec<R>,
}

impl<R> PropertyStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates a store over an existing record sequence.
    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Appends a record after the current last record.
    pub fn push(&mut self, record: R) {
        self.records.push(record);
    }

    /// Inserts a record at `index`, shifting later records toward the end.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&mut self, index: usize, record: R) {
        self.records.insert(index, record);
    }

    /// Removes and returns the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, like [`Vec::remove`].
    pub fn remove(&mut self, index: usize) -> R {
        self.records.remove(index)
    }

    /// The record at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&R> {
        self.records.get(index)
    }

    /// Mutable access to the record at `index`, if present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut R> {
        self.records.get_mut(index)
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in on-disk order.
    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }

    /// The records as a slice, in on-disk order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Consumes the store, yielding its record sequence.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R> Default for PropertyStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: WireStructure> PropertyStore<R> {
    /// The store size: 8 framing bytes plus the sum of all record sizes.
    ///
    /// Recomputed from the record list on every call.
    pub fn store_size(&self) -> u32 {
        let total = u64::from(STORE_FRAMING_LEN)
            + self
                .records
                .iter()
                .map(|r| u64::from(r.wire_size()))
                .sum::<u64>();
        debug_assert!(total <= u64::from(u32::MAX), "store size overflows the u32 size field");
        total as u32
    }

    /// Parses a store image with the given record codec.
    ///
    /// # Errors
    ///
    /// Any framing or codec failure from [`StoreReader`], unchanged.
    pub fn parse_with<C: RecordCodec<Record = R>>(codec: &C, buf: &[u8]) -> StoreResult<Self> {
        let mut reader = StoreReader::new(buf)?;
        let mut records = Vec::new();
        while let Some(record) = reader.read_next(codec)? {
            records.push(record);
        }
        debug!(
            records = records.len(),
            declared = reader.declared_size(),
            "property store parsed"
        );
        Ok(Self { records })
    }
}

impl PropertyStore<StorageRecord> {
    /// Parses a store image, capturing each record as an opaque blob.
    ///
    /// # Errors
    ///
    /// Any framing or codec failure from [`StoreReader`], unchanged.
    pub fn from_bytes(buf: &[u8]) -> StoreResult<Self> {
        Self::parse_with(&RawRecordCodec, buf)
    }
}

impl<R: WireStructure> WireStructure for PropertyStore<R> {
    fn wire_size(&self) -> u32 {
        self.store_size()
    }

    fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        let store_size = self.store_size();
        let mut writer = StoreWriter::new(store_size);
        for record in &self.records {
            writer.append(record)?;
        }
        let image = writer.finish();
        debug_assert_eq!(image.len(), store_size as usize);
        Ok(image)
    }

    fn describe(&self) -> String {
        let mut text = format!("StoreSize: {} (0x{:X})", self.store_size(), self.store_size());
        for record in &self.records {
            text.push('\n');
            text.push_str(&record.describe());
        }
        text
    }
}

impl<R: WireStructure> fmt::Display for PropertyStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<'a, R> IntoIterator for &'a PropertyStore<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
