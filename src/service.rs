//! Document service: ties the store, the key generator and the canvas
//! operations together.
//!
//! Every mutating call loads the document, applies the operation to the
//! in-memory canvas and writes the result back. A failed operation never
//! reaches the store.

use crate::canvas::Canvas;
use crate::keygen::KeyGen;
use crate::requests::{CreateCanvas, DrawRect, FloodFill};
use crate::store::DocumentStore;
use crate::{Error, Result, ServiceConfig};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// A page of document keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentPage {
    /// Cursor of the next page, absent on the last one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,
    pub count: usize,
    /// Number of documents in the store, absent if the store could not tell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub docs: Vec<String>,
}

pub struct CanvasService<S, K> {
    store: S,
    keygen: K,
    config: ServiceConfig,
}

impl<S: DocumentStore, K: KeyGen> CanvasService<S, K> {
    pub fn new(store: S, keygen: K, config: ServiceConfig) -> Self {
        Self { store, keygen, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a blank canvas under a fresh key and return the key.
    pub fn create_document(&self, req: CreateCanvas) -> Result<String> {
        debug!("received create document request ({}x{})", req.width, req.height);

        self.check_size(req.width, req.height)?;

        let key = self.keygen.generate();
        self.store.set(&key, &req.into_canvas())?;

        info!("document created: {}", key);
        Ok(key)
    }

    pub fn get_document(&self, key: &str) -> Result<Canvas> {
        debug!("received get document request: {}", key);
        self.store.get(key)
    }

    /// List document keys. A `limit` of 0 uses the configured page size.
    pub fn list_documents(&self, cursor: u64, limit: usize) -> Result<DocumentPage> {
        let limit = if limit == 0 { self.config.page_limit } else { limit };
        debug!("received get document list request: cursor={} limit={}", cursor, limit);

        let page = self.store.list(cursor, limit)?;

        // The total is informative only; a listing without it is still useful.
        let total = match self.store.size() {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("failed to retrieve number of documents in store: {}", e);
                None
            }
        };

        Ok(DocumentPage {
            next: (page.cursor != 0).then_some(page.cursor),
            count: page.keys.len(),
            total,
            docs: page.keys,
        })
    }

    pub fn delete_document(&self, key: &str) -> Result<()> {
        self.store.delete(key)?;
        info!("document deleted: {}", key);
        Ok(())
    }

    pub fn draw_rect(&self, key: &str, req: &DrawRect) -> Result<Canvas> {
        self.edit(key, "add-rect", |canvas| req.apply(canvas))
    }

    pub fn flood_fill(&self, key: &str, req: &FloodFill) -> Result<Canvas> {
        self.edit(key, "add-flood-fill", |canvas| req.apply(canvas))
    }

    /// Canvases past the configured limits are neither created nor edited.
    fn check_size(&self, width: u32, height: u32) -> Result<()> {
        if width > self.config.max_width || height > self.config.max_height {
            return Err(Error::InvalidRequest(format!(
                "canvas {}x{} exceeds the {}x{} limit",
                width, height, self.config.max_width, self.config.max_height
            )));
        }
        Ok(())
    }

    fn edit<F>(&self, key: &str, operation: &str, op: F) -> Result<Canvas>
    where
        F: FnOnce(&mut Canvas) -> Result<()>,
    {
        debug!("received {} request for {}", operation, key);

        let mut canvas = self.store.get(key)?;
        self.check_size(canvas.width(), canvas.height())?;
        if let Err(e) = op(&mut canvas) {
            info!("{} on {} rejected: {}", operation, key, e);
            return Err(e);
        }
        self.store.set(key, &canvas)?;

        debug!("{} applied to {}", operation, key);
        Ok(canvas)
    }
}
