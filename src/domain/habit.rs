/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a behavior the
/// user wants to track, along with its validation and completion history.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, Frequency, HabitId};

/// A habit represents something the user wants to do regularly
///
/// Habits are created, changed and removed only by the habit store. Callers
/// receive copies and read them through the accessor methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier, assigned by the store
    id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    name: String,
    /// Free text, may be empty
    description: String,
    /// How often this habit should be performed
    frequency: Frequency,
    /// When this habit was created (absent for legacy records)
    created_at: Option<DateTime<Utc>>,
    /// Days on which the habit was completed, oldest first
    history: Vec<NaiveDate>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// The habit starts with an empty history. The name must contain at least
    /// one non-whitespace character.
    pub fn new(
        id: HabitId,
        name: String,
        description: String,
        frequency: Frequency,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            description,
            frequency,
            created_at: Some(created_at),
            history: Vec::new(),
        })
    }

    /// Create a habit from existing data (used when loading stored records)
    ///
    /// No validation happens here: stored data is taken as-is so that
    /// malformed records still load.
    pub fn from_existing(
        id: HabitId,
        name: String,
        description: String,
        frequency: Frequency,
        created_at: Option<DateTime<Utc>>,
        history: Vec<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            frequency,
            created_at,
            history,
        }
    }

    pub fn id(&self) -> HabitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn frequency(&self) -> &Frequency {
        &self.frequency
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Completion dates, oldest first
    pub fn history(&self) -> &[NaiveDate] {
        &self.history
    }

    /// Most recent completion date
    pub fn last_completed(&self) -> Option<NaiveDate> {
        self.history.last().copied()
    }

    /// Whether the habit was completed on `date`
    ///
    /// Since entries are only ever appended for the current day, checking the
    /// last entry is enough. The "done today" flag is derived from this
    /// rather than stored, so it can never go stale across midnight.
    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.last_completed() == Some(date)
    }

    /// Append `date` to the history
    ///
    /// Returns false and leaves the history untouched unless `date` is later
    /// than the most recent entry. An entry after `date` (a clock set back,
    /// or data written elsewhere) counts as already done.
    pub(crate) fn record_completion(&mut self, date: NaiveDate) -> bool {
        if self.last_completed().is_some_and(|last| last >= date) {
            return false;
        }
        self.history.push(date);
        true
    }

    /// Drop `date` again if it is the most recent entry
    ///
    /// Only used to roll back a completion whose write failed.
    pub(crate) fn undo_completion(&mut self, date: NaiveDate) {
        if self.is_done_on(date) {
            self.history.pop();
        }
    }

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }
        Ok(())
    }
}
