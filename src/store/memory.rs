//! In-memory document store

use super::{page_of, DocumentStore, KeyPage};
use crate::canvas::Canvas;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Encoded records kept in a mutex-guarded ordered map
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Raw record bytes, as another reader of the store would see them.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.records().get(key).cloned()
    }

    /// Store raw bytes under `key` without any checks.
    pub fn insert_raw(&self, key: &str, record: Vec<u8>) {
        self.records().insert(key.to_string(), record);
    }
}

impl DocumentStore for MemoryStore {
    fn size(&self) -> Result<u64> {
        Ok(self.records().len() as u64)
    }

    fn list(&self, cursor: u64, count: usize) -> Result<KeyPage> {
        let keys: Vec<String> = self.records().keys().cloned().collect();
        Ok(page_of(keys, cursor, count))
    }

    fn get(&self, key: &str) -> Result<Canvas> {
        let record = self
            .raw(key)
            .ok_or_else(|| Error::NotFound(key.to_string()))?;
        Canvas::decode(&record)
    }

    fn set(&self, key: &str, doc: &Canvas) -> Result<()> {
        let record = doc.encode()?;
        self.insert_raw(key, record);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.records()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }
}
