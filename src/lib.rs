/// Public library interface for the Habit Quest tracker
///
/// This module exports the habit store, the progression rules, the storage
/// adapters, and `HabitTracker`, which ties them together for the
/// command-line binary or any other front end.

use thiserror::Error;

// Internal modules
pub mod clock;
pub mod config;
mod domain;
pub mod progression;
mod storage;
pub mod store;
pub mod tools;

// Re-export public modules and types
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Backend, TrackerConfig};
pub use domain::*;
pub use progression::{MarkDoneOutcome, Progress, ProgressionCalculator};
pub use storage::{
    HabitStorage, JsonFileStorage, MemoryStorage, ProgressFile, SqliteStorage, StorageError,
};
pub use store::HabitStore;

/// Errors that can surface from the habit tracker
///
/// Lookups of unknown habits are not errors; they show up as empty results.
/// Read problems are absorbed while loading. What remains is invalid input
/// and failed writes.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),
}

/// A habit store paired with the player's saved progress
///
/// Progress lives in its own file next to the habit data and is saved each
/// time a completion changes it.
pub struct HabitTracker<S: HabitStorage = Box<dyn HabitStorage>> {
    store: HabitStore<S>,
    progress: Progress,
    progress_file: ProgressFile,
}

impl HabitTracker {
    /// Open the tracker described by `config`
    pub fn open(config: &TrackerConfig) -> Result<Self, TrackerError> {
        tracing::info!("Opening habit data at {} ({:?})", config.path.display(), config.backend);
        let storage = config.open_storage()?;
        Ok(Self::with_storage(storage, ProgressFile::beside(&config.path)))
    }
}

impl<S: HabitStorage> HabitTracker<S> {
    /// Build a tracker over an already opened storage adapter
    pub fn with_storage(storage: S, progress_file: ProgressFile) -> Self {
        let store = HabitStore::new(storage, ProgressionCalculator::new());
        let progress = progress_file.load();
        tracing::info!("Tracker ready: {} habits, level {}", store.len(), progress.level);

        Self {
            store,
            progress,
            progress_file,
        }
    }

    pub fn add(&mut self, params: tools::AddHabitParams) -> Result<tools::AddHabitResponse, TrackerError> {
        tools::add_habit(&mut self.store, params)
    }

    /// Mark a habit done, then save the updated progress
    ///
    /// The completion is already stored when progress is written. If that
    /// second write fails, in-memory progress goes back to its saved value
    /// and the award for today is lost.
    pub fn mark_done(
        &mut self,
        params: tools::MarkDoneParams,
    ) -> Result<tools::MarkDoneResponse, TrackerError> {
        let saved = self.progress;
        let response = tools::mark_habit_done(&mut self.store, &mut self.progress, params)?;
        if response.xp_awarded > 0 {
            if let Err(e) = self.progress_file.save(&self.progress) {
                tracing::warn!("Could not save progress, dropping {} XP", response.xp_awarded);
                self.progress = saved;
                return Err(e.into());
            }
        }
        Ok(response)
    }

    pub fn list(&self) -> tools::ListHabitsResponse {
        tools::list_habits(&self.store)
    }

    pub fn delete(
        &mut self,
        params: tools::DeleteHabitParams,
    ) -> Result<tools::DeleteHabitResponse, TrackerError> {
        tools::delete_habit(&mut self.store, params)
    }

    pub fn status(&self) -> tools::StatusResponse {
        tools::get_status(&self.store, &self.progress)
    }

    /// Get a reference to the habit store (useful for testing)
    pub fn store(&self) -> &HabitStore<S> {
        &self.store
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }
}
