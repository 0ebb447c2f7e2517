//! Document Store
//!
//! Owns persistence of the [`Document`](crate::model::Document): seeding, loading with
//! repair, and whole-document saves after every mutation.

pub mod backend;
pub mod document_store;
pub mod ids;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use document_store::{DocumentStore, DEFAULT_STORAGE_KEY};
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
