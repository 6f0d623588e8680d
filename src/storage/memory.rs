/// In-memory implementation of the habit storage interface
///
/// Nothing outlives the process. Useful in tests and for callers that embed
/// the store without wanting a file.

use crate::domain::RawRecord;
use crate::storage::{HabitStorage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Vec<RawRecord>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `records`
    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self { records, saves: 0 }
    }

    /// The records as last saved
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    /// How many times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl HabitStorage for MemoryStorage {
    fn load(&self) -> Vec<RawRecord> {
        self.records.clone()
    }

    fn save(&mut self, records: &[RawRecord]) -> Result<(), StorageError> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }
}
