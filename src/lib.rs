//! License Tracker
//!
//! Keeps software licenses grouped by manufacturer in a small JSON document.
//!
//! This library provides:
//! - The document model and its mutation rules
//! - A document store with seeding, load-time repair and whole-document saves
//! - Admin session gating and input validation for callers
//! - A command-line front end

pub mod cli;
pub mod config;
pub mod error;
pub mod migrate;
pub mod model;
pub mod session;
pub mod store;
pub mod validate;

// Re-exports for clean public API
pub use config::Config;
pub use error::{Result, StoreError};
pub use model::{Cell, Column, Document, Manufacturer, Outcome, Row};
pub use session::Session;
pub use store::{Backend, DocumentStore, FileBackend, IdGenerator, MemoryBackend};
