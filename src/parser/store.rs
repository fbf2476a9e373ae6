//! Append-only record store.
//!
//! Room for records is reserved in fixed batches with fallible allocation,
//! so running out of memory surfaces as an error instead of an abort.

use super::record::{Direction, Record};
use crate::utils::config::ALLOC_BATCH;
use std::collections::TryReserveError;
use std::ops::Index;

/// Ordered collection of records for one run
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    batch: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::with_batch(ALLOC_BATCH)
    }

    /// Create a store that grows by `batch` records at a time
    pub fn with_batch(batch: usize) -> Self {
        Self {
            records: Vec::new(),
            batch: batch.max(1),
        }
    }

    /// Append a record, reserving another batch first when full
    pub fn push(&mut self, record: Record) -> Result<(), TryReserveError> {
        if self.records.len() == self.records.capacity() {
            self.records.try_reserve_exact(self.batch)?;
        }
        self.records.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Direction sequence in cycle order
    pub fn directions(&self) -> Vec<Direction> {
        self.records.iter().map(Record::direction).collect()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for RecordStore {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
