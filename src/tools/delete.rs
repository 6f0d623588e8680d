/// Command for removing habits

use serde::{Deserialize, Serialize};
use crate::clock::Clock;
use crate::domain::HabitId;
use crate::storage::HabitStorage;
use crate::store::HabitStore;
use crate::TrackerError;

/// Parameters for removing a habit
#[derive(Debug, Deserialize)]
pub struct DeleteHabitParams {
    pub habit_id: u64,
}

/// Response from removing a habit
#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub success: bool,
    pub message: String,
}

/// Remove a habit from the provided store
pub fn delete_habit<S: HabitStorage, C: Clock>(
    store: &mut HabitStore<S, C>,
    params: DeleteHabitParams,
) -> Result<DeleteHabitResponse, TrackerError> {
    let id = HabitId(params.habit_id);
    let name = store.find(id).map(|habit| habit.name().to_string());
    let removed = store.delete(id)?;

    let message = match (removed, name) {
        (true, Some(name)) => format!("Deleted habit '{}' (id {})", name, id),
        _ => format!("No habit with id {}", id),
    };

    Ok(DeleteHabitResponse {
        success: removed,
        message,
    })
}
