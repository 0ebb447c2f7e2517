//! Persistence and document-level operations.

use std::fmt;
use std::io;

use log::{debug, info, warn};

use crate::error::Result;
use crate::migrate;
use crate::model::{Document, Manufacturer, Outcome};
use crate::store::backend::Backend;
use crate::store::ids::{IdGenerator, UuidGenerator};

/// Key the document is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "licenseTrackerData";

/// Name of the manufacturer placed in a freshly seeded document
pub const SEED_MANUFACTURER_NAME: &str = "Example Manufacturer";

/// Columns of the seeded manufacturer, in order
pub const SEED_COLUMN_NAMES: [&str; 3] = ["License Key", "Expiry Date", "Seats"];

/// Canonical owner of the persisted [`Document`].
///
/// Every successful mutation writes the whole document back before returning; there
/// is no separate commit step. Concurrent writers are not detected, the last full
/// write wins.
pub struct DocumentStore<B, G = UuidGenerator> {
    backend: B,
    ids: G,
    key: String,
}

impl<B: Backend> DocumentStore<B, UuidGenerator> {
    pub fn new(backend: B) -> Self {
        Self::with_ids(backend, UuidGenerator)
    }
}

impl<B: Backend, G: IdGenerator> DocumentStore<B, G> {
    pub fn with_ids(backend: B, ids: G) -> Self {
        Self {
            backend,
            ids,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Store the document under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn ids(&self) -> &G {
        &self.ids
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the document, seeding the backend when it is empty or corrupt.
    ///
    /// A value that cannot be decoded or parsed is discarded and replaced by the seed;
    /// it is logged but never returned as an error. Only backend I/O failures are
    /// errors. Rows are normalized on every load, and a repaired document is written
    /// back.
    pub fn load(&self) -> Result<Document> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.seed(),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => return self.reseed(e),
            Err(e) => return Err(e.into()),
        };

        match migrate::parse(&raw) {
            Ok(repaired) => {
                if repaired.is_changed() {
                    info!(
                        "Repaired stored document: {} cells added, {} unreadable entries dropped",
                        repaired.cells_added, repaired.entries_dropped
                    );
                    self.save(&repaired.document)?;
                }
                Ok(repaired.document)
            }
            Err(e) => self.reseed(e),
        }
    }

    fn reseed(&self, reason: impl fmt::Display) -> Result<Document> {
        warn!("Stored document is unreadable, reinitializing: {}", reason);
        self.backend.remove(&self.key)?;
        self.seed()
    }

    fn seed(&self) -> Result<Document> {
        let mut manufacturer = Manufacturer::new(self.ids.generate(), SEED_MANUFACTURER_NAME);
        let ids: &dyn IdGenerator = &self.ids;
        for name in SEED_COLUMN_NAMES {
            manufacturer.add_column(ids, name);
        }
        let document = Document {
            manufacturers: vec![manufacturer],
        };
        self.save(&document)?;
        info!("Seeded new document under key '{}'", self.key);
        Ok(document)
    }

    /// Overwrite the backend with the serialized document
    pub fn save(&self, document: &Document) -> Result<()> {
        let serialized = serde_json::to_string(document)?;
        self.backend.set(&self.key, &serialized)?;
        debug!(
            "Saved document with {} manufacturers",
            document.manufacturers.len()
        );
        Ok(())
    }

    /// Append a new, empty manufacturer and persist.
    ///
    /// Names are not checked here; see [`crate::validate`].
    pub fn add_manufacturer(&self, document: &mut Document, name: &str) -> Result<Manufacturer> {
        let manufacturer = Manufacturer::new(self.ids.generate(), name);
        document.manufacturers.push(manufacturer.clone());
        self.save(document)?;
        debug!("Added manufacturer {} ({})", manufacturer.id, manufacturer.name);
        Ok(manufacturer)
    }

    /// Remove a manufacturer with all its columns and rows, then persist
    pub fn remove_manufacturer(&self, document: &mut Document, id: &str) -> Result<Outcome> {
        let before = document.manufacturers.len();
        document.manufacturers.retain(|m| m.id != id);
        self.save(document)?;
        if document.manufacturers.len() == before {
            Ok(Outcome::NotFound)
        } else {
            debug!("Removed manufacturer {}", id);
            Ok(Outcome::Applied)
        }
    }

    /// Replace the manufacturer with the same id and persist.
    ///
    /// An unknown id leaves the document and the backend untouched.
    pub fn update_manufacturer(
        &self,
        document: &mut Document,
        manufacturer: Manufacturer,
    ) -> Result<Outcome> {
        match document.find_manufacturer_mut(&manufacturer.id) {
            Some(slot) => {
                *slot = manufacturer;
                self.save(document)?;
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::NotFound),
        }
    }

    /// Reload, edit one manufacturer, normalize its rows and persist.
    ///
    /// Returns `None` when the manufacturer no longer exists in the stored document.
    pub fn modify_manufacturer<R>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut Manufacturer, &dyn IdGenerator) -> R,
    ) -> Result<Option<R>> {
        let mut document = self.load()?;
        let Some(mut manufacturer) = document.find_manufacturer(id).cloned() else {
            return Ok(None);
        };
        let ids: &dyn IdGenerator = &self.ids;
        let result = edit(&mut manufacturer, ids);
        manufacturer.normalize_rows();
        self.update_manufacturer(&mut document, manufacturer)?;
        Ok(Some(result))
    }
}
