/// Command for creating new habits

use serde::{Deserialize, Serialize};
use crate::clock::Clock;
use crate::domain::Frequency;
use crate::storage::HabitStorage;
use crate::store::HabitStore;
use crate::TrackerError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize)]
pub struct AddHabitParams {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Option<String>, // Defaults to "daily"
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct AddHabitResponse {
    pub success: bool,
    pub habit_id: u64,
    pub message: String,
}

/// Create a new habit in the provided store
pub fn add_habit<S: HabitStorage, C: Clock>(
    store: &mut HabitStore<S, C>,
    params: AddHabitParams,
) -> Result<AddHabitResponse, TrackerError> {
    let frequency = params
        .frequency
        .map(Frequency::new)
        .unwrap_or_default();

    let habit = store.add(
        params.name.trim(),
        params.description.unwrap_or_default(),
        frequency,
    )?;

    Ok(AddHabitResponse {
        success: true,
        habit_id: habit.id().value(),
        message: format!(
            "Created habit '{}' (id {}, {})",
            habit.name(),
            habit.id(),
            habit.frequency()
        ),
    })
}
