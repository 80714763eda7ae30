//! Persistence service: one JSON file per storage key.
//!
//! DESIGN
//! ======
//! The engine publishes the whole board after every frame that followed a
//! mutation, so a save always rewrites the file. Writes go to a sibling
//! temporary file that is then renamed over the target, which keeps a
//! crash mid-write from leaving a truncated document behind. A file that
//! does not parse as a board document is deleted on load, the same as
//! clearing a corrupt browser storage key.
//!
//! Saves use blocking `std::fs` calls and run inside `EngineCore::frame` on
//! the frame-loop task. The host drives one board from one task, and a save
//! only happens after a frame with a board change, so the write stalls
//! nothing else. `DocumentStore` is a synchronous trait because the browser
//! storage it mirrors is synchronous.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use canvas::doc::Document;
use canvas::store::{DocumentStore, StoreError};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store for `<dir>/<key>.json`.
    #[must_use]
    pub fn new(dir: &Path, key: &str) -> Self {
        Self { path: dir.join(format!("{key}.json")) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn discard_malformed(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => warn!(path = %self.path.display(), "deleted malformed board file"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not delete malformed board file"),
        }
    }
}

impl DocumentStore for FileStore {
    fn load(&mut self) -> Result<Option<Document>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match Document::parse(&raw) {
            Ok(doc) => {
                debug!(path = %self.path.display(), squares = doc.squares.len(), "loaded board");
                Ok(Some(doc))
            }
            Err(e) => {
                self.discard_malformed();
                Err(e.into())
            }
        }
    }

    fn save(&mut self, doc: &Document) -> Result<(), StoreError> {
        let json = doc.to_json()?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
