//! Document storage: a small key/value contract over encoded canvas records
//!
//! Stores keep the record bytes produced by [`Canvas::encode`] and hand back
//! decoded canvases, so every backend persists the same wire format.

pub mod dir;
pub mod memory;

pub use dir::DirStore;
pub use memory::MemoryStore;

use crate::canvas::Canvas;
use crate::{Error, Result};
use std::sync::Arc;

/// One page of a key listing. A `cursor` of 0 means there are no more pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPage {
    pub keys: Vec<String>,
    pub cursor: u64,
}

/// A key/value store of canvas documents.
pub trait DocumentStore: Send + Sync {
    /// Number of stored documents
    fn size(&self) -> Result<u64>;

    /// Up to `count` keys in key order, starting at `cursor` (0 for the first
    /// page).
    fn list(&self, cursor: u64, count: usize) -> Result<KeyPage>;

    /// Fetch and decode a document; `NotFound` when the key is absent.
    fn get(&self, key: &str) -> Result<Canvas>;

    /// Insert or replace a document.
    fn set(&self, key: &str, doc: &Canvas) -> Result<()>;

    /// Remove a document; `NotFound` when the key is absent.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    fn size(&self) -> Result<u64> {
        (**self).size()
    }

    fn list(&self, cursor: u64, count: usize) -> Result<KeyPage> {
        (**self).list(cursor, count)
    }

    fn get(&self, key: &str) -> Result<Canvas> {
        (**self).get(key)
    }

    fn set(&self, key: &str, doc: &Canvas) -> Result<()> {
        (**self).set(key, doc)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// Keys are limited to ASCII letters, digits, `_` and `-`.
pub fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!("invalid document key {:?}", key)))
    }
}

/// Slice a sorted key listing into a page, SCAN style: the returned cursor is
/// the offset of the next page, or 0 once the listing is exhausted.
pub(crate) fn page_of<I>(keys: I, cursor: u64, count: usize) -> KeyPage
where
    I: IntoIterator<Item = String>,
{
    let start = usize::try_from(cursor).unwrap_or(usize::MAX);
    let mut rest = keys.into_iter().skip(start);
    let keys: Vec<String> = rest.by_ref().take(count).collect();
    let more = rest.next().is_some();

    let cursor = if more {
        (start + keys.len()) as u64
    } else {
        0
    };
    KeyPage { keys, cursor }
}
