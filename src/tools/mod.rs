/// Commands for habit management
///
/// Each command takes the habit store plus a parameter struct and returns a
/// serializable response carrying a human-readable message. The binary
/// turns command-line arguments into these parameters.

pub mod add;
pub mod delete;
pub mod done;
pub mod list;
pub mod status;

// Re-export command functions for easy access
pub use add::*;
pub use delete::*;
pub use done::*;
pub use list::*;
pub use status::*;

use crate::clock::Clock;
use crate::domain::{Habit, HabitId};
use crate::storage::HabitStorage;
use crate::store::HabitStore;

/// Find a habit from user input: an id if it parses as one, otherwise a name
///
/// A numeric string that matches no id is still tried as a name, so habits
/// called "10000" stay reachable.
pub fn resolve_habit<S: HabitStorage, C: Clock>(
    store: &HabitStore<S, C>,
    reference: &str,
) -> Option<Habit> {
    let reference = reference.trim();
    reference
        .parse::<u64>()
        .ok()
        .and_then(|id| store.find(HabitId(id)))
        .or_else(|| store.find_by_name(reference))
}
