/// Storage layer for persisting habit records
///
/// This module defines the capability every persistence adapter offers to
/// the habit store: load all records, save all records. Adapters work with
/// raw records only; turning them into habits is the domain layer's job.

pub mod json;
pub mod memory;
pub mod migrations;
pub mod progress;
pub mod sqlite;

// Re-export the storage types
pub use json::*;
pub use memory::*;
pub use progress::*;
pub use sqlite::*;

use thiserror::Error;
use crate::domain::RawRecord;

/// Errors that can occur while writing to a backing store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the persistence interface for habit records
///
/// Loading is infallible by contract: a missing or unreadable backing store
/// yields an empty list. Saving replaces everything previously stored and
/// reports failure, since a lost write means lost user data.
pub trait HabitStorage {
    /// Load every stored record
    fn load(&self) -> Vec<RawRecord>;

    /// Replace the stored records with `records`
    fn save(&mut self, records: &[RawRecord]) -> Result<(), StorageError>;
}

impl<S: HabitStorage + ?Sized> HabitStorage for Box<S> {
    fn load(&self) -> Vec<RawRecord> {
        (**self).load()
    }

    fn save(&mut self, records: &[RawRecord]) -> Result<(), StorageError> {
        (**self).save(records)
    }
}
