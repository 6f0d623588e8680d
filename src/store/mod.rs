/// The habit store: lifecycle management for the habit collection
///
/// The store owns every habit in memory, hands out ids, and writes the
/// whole collection through its storage collaborator after each change.
/// Marking a habit done is the one business operation with real rules: one
/// completion per habit per day, with XP computed by the progression
/// calculator.

use std::collections::HashSet;

use crate::clock::{Clock, SystemClock};
use crate::domain::{
    decode_record, encode_habit, DomainError, Frequency, Habit, HabitId, RawRecord,
};
use crate::progression::{MarkDoneOutcome, ProgressionCalculator};
use crate::storage::HabitStorage;
use crate::TrackerError;

/// In-memory habit collection backed by a storage collaborator
///
/// Every mutating operation finishes its storage write before returning. If
/// the write fails the in-memory change is undone and the error is
/// returned, so memory and storage never disagree.
pub struct HabitStore<S: HabitStorage, C: Clock = SystemClock> {
    storage: S,
    calculator: ProgressionCalculator,
    clock: C,
    habits: Vec<Habit>,
    next_id: HabitId,
}

impl<S: HabitStorage> HabitStore<S, SystemClock> {
    /// Create a store over `storage`, loading whatever it holds
    pub fn new(storage: S, calculator: ProgressionCalculator) -> Self {
        Self::with_clock(storage, calculator, SystemClock)
    }
}

impl<S: HabitStorage, C: Clock> HabitStore<S, C> {
    /// Create a store that reads the current date from `clock`
    ///
    /// Loading never fails: unreadable storage gives an empty store, and
    /// malformed records are filled in with defaults.
    pub fn with_clock(storage: S, calculator: ProgressionCalculator, clock: C) -> Self {
        let mut store = Self {
            storage,
            calculator,
            clock,
            habits: Vec::new(),
            next_id: HabitId::FIRST,
        };
        store.load();
        store
    }

    /// Replace the in-memory collection with what storage holds
    fn load(&mut self) {
        let decoded: Vec<_> = self.storage.load().iter().map(decode_record).collect();

        // Records without a usable id, or repeating an earlier one, get ids
        // past the highest stored id so every habit stays unique.
        // decode_record never yields u64::MAX, so the maximum has a successor.
        let max_id = decoded.iter().filter_map(|record| record.id).max();
        let mut next_id = max_id.and_then(HabitId::next).unwrap_or(HabitId::FIRST);
        let mut seen = HashSet::new();

        let mut habits = Vec::with_capacity(decoded.len());
        for record in decoded {
            let id = match record.id {
                Some(id) if seen.insert(id) => id,
                stored => {
                    let Some(fresh) = allocate(&mut next_id) else {
                        tracing::warn!("No id left for habit '{}', skipping it", record.name);
                        continue;
                    };
                    seen.insert(fresh);
                    match stored {
                        Some(dup) => tracing::warn!("Duplicate habit id {} reassigned to {}", dup, fresh),
                        None => tracing::debug!("Habit without id assigned {}", fresh),
                    }
                    fresh
                }
            };
            habits.push(record.into_habit(id));
        }

        tracing::info!("Loaded {} habits, next id {}", habits.len(), next_id);
        self.habits = habits;
        self.next_id = next_id;
    }

    /// Write the full collection to storage
    fn persist(&mut self) -> Result<(), TrackerError> {
        let today = self.clock.today();
        let records: Vec<RawRecord> = self
            .habits
            .iter()
            .map(|habit| encode_habit(habit, today))
            .collect();
        self.storage.save(&records)?;
        Ok(())
    }

    /// Create a new habit and persist it
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        frequency: Frequency,
    ) -> Result<Habit, TrackerError> {
        let habit = Habit::new(
            self.next_id,
            name.into(),
            description.into(),
            frequency,
            self.clock.now(),
        )?;
        let after = habit
            .id()
            .next()
            .ok_or(DomainError::IdsExhausted(habit.id()))?;

        self.habits.push(habit.clone());
        self.next_id = after;

        if let Err(e) = self.persist() {
            self.habits.pop();
            self.next_id = habit.id();
            return Err(e);
        }

        tracing::info!("Created habit: {} ({})", habit.name(), habit.id());
        Ok(habit)
    }

    /// Remove the habit with `id`
    ///
    /// Returns false when no such habit exists; that is not an error.
    pub fn delete(&mut self, id: HabitId) -> Result<bool, TrackerError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.habits.remove(index);
        if let Err(e) = self.persist() {
            self.habits.insert(index, removed);
            return Err(e);
        }

        tracing::info!("Deleted habit: {} ({})", removed.name(), id);
        Ok(true)
    }

    /// Snapshot of every habit in insertion order
    pub fn list(&self) -> Vec<Habit> {
        self.habits.clone()
    }

    /// Look up a habit by id
    pub fn find(&self, id: HabitId) -> Option<Habit> {
        self.habits.iter().find(|habit| habit.id() == id).cloned()
    }

    /// First habit whose name matches `name` exactly
    pub fn find_by_name(&self, name: &str) -> Option<Habit> {
        self.habits.iter().find(|habit| habit.name() == name).cloned()
    }

    /// Mark a habit as done for today
    ///
    /// Returns `Ok(None)` when the habit does not exist. A second call on the
    /// same day is accepted but awards nothing and adds no history entry.
    /// Level-ups are left at zero; they depend on a running total the caller
    /// keeps (see `Progress::record`).
    pub fn mark_done(
        &mut self,
        id: HabitId,
        progress_amount: i64,
    ) -> Result<Option<MarkDoneOutcome>, TrackerError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let today = self.clock.today();
        if !self.habits[index].record_completion(today) {
            tracing::debug!("Habit {} already done on {}", id, today);
            self.persist()?;
            return Ok(Some(MarkDoneOutcome::nothing()));
        }

        let xp_awarded = self.calculator.award_for_action(progress_amount);
        if let Err(e) = self.persist() {
            self.habits[index].undo_completion(today);
            return Err(e);
        }

        tracing::info!("Habit {} done on {}, awarded {} XP", id, today, xp_awarded);
        Ok(Some(MarkDoneOutcome::awarded(xp_awarded)))
    }

    /// Whether `habit` has been completed on the store's current day
    pub fn is_done_today(&self, habit: &Habit) -> bool {
        habit.is_done_on(self.clock.today())
    }

    /// Id the next added habit will receive
    pub fn next_id(&self) -> HabitId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn calculator(&self) -> &ProgressionCalculator {
        &self.calculator
    }

    /// Get a reference to the storage collaborator (useful for testing)
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: HabitId) -> Option<usize> {
        self.habits.iter().position(|habit| habit.id() == id)
    }
}

/// Hand out the counter's id and move the counter past it
///
/// The counter has to stay above every id in use, so the last u64 is never
/// handed out; None means the id space is used up.
fn allocate(counter: &mut HabitId) -> Option<HabitId> {
    let id = *counter;
    *counter = id.next()?;
    Some(id)
}
