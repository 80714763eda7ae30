//! Persistence seam: the storage collaborator and an in-memory implementation.
//!
//! The core never touches durable storage itself. A host hands it something
//! that implements [`DocumentStore`], and every failure to load is treated the
//! same as having no saved board.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use tracing::{error, warn};

use crate::board::Board;
use crate::doc::{self, Document, DocumentError};
use crate::options::BoardOptions;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("stored document is malformed: {0}")]
    Malformed(#[from] DocumentError),
}

/// Reads and writes one board document under a fixed key.
pub trait DocumentStore {
    /// Fetch the saved document. `Ok(None)` means nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage fails or holds content
    /// that is not a valid document.
    fn load(&mut self) -> Result<Option<Document>, StoreError>;

    /// Replace the saved document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when encoding or the backing storage fails.
    fn save(&mut self, doc: &Document) -> Result<(), StoreError>;
}

/// Load a board from `store`, falling back to an empty one on any failure.
pub fn load_or_empty(store: &mut dyn DocumentStore, options: BoardOptions) -> Board {
    match store.load() {
        Ok(Some(doc)) => doc::from_document(&doc, options),
        Ok(None) => Board::new(options),
        Err(e) => {
            warn!(error = %e, "could not load saved board; starting empty");
            Board::new(options)
        }
    }
}

/// Wrap a store as a publication callback for
/// [`crate::engine::EngineCore::subscribe`]. Save failures are logged.
pub fn save_on_publish<S: DocumentStore + 'static>(mut store: S) -> impl FnMut(&Document) + 'static {
    move |doc| {
        if let Err(e) = store.save(doc) {
            error!(error = %e, "failed to save board");
        }
    }
}

/// Keeps the encoded document in memory, like a browser key/value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    /// Start with raw stored content, valid or not.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()) }
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl DocumentStore for MemoryStore {
    /// Malformed content is dropped so the next load starts clean.
    fn load(&mut self) -> Result<Option<Document>, StoreError> {
        let Some(raw) = self.raw.as_deref() else {
            return Ok(None);
        };
        match Document::parse(raw) {
            Ok(doc) => Ok(Some(doc)),
            Err(e) => {
                self.raw = None;
                Err(e.into())
            }
        }
    }

    fn save(&mut self, doc: &Document) -> Result<(), StoreError> {
        self.raw = Some(doc.to_json()?);
        Ok(())
    }
}
