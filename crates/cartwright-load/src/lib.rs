//! Builds the SQLite store from generated CSV artifacts.
//!
//! Loading always starts from a fresh database file: any existing store at
//! the target path is replaced, the schema is created with foreign keys
//! enforced, and every table is inserted inside its own transaction. A
//! verification pass runs after each load and reports row and orphan counts.

pub mod errors;
pub mod loader;
pub mod schema;
pub mod verify;

pub use errors::LoadError;
pub use loader::{load_store, LoadSummary};
pub use verify::{verify_store, OrphanCounts, StoreVerification};
