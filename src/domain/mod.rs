/// Domain module containing core entities and data conversion
///
/// This module defines the Habit entity, its identifier and frequency types,
/// and the conversion boundary between habits and the raw records that
/// storage adapters read and write.

pub mod habit;
pub mod record;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use record::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Habit id space exhausted at {0}")]
    IdsExhausted(HabitId),
}
