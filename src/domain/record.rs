/// Conversion between habits and raw storage records
///
/// Storage adapters only ever see `RawRecord`s, plain JSON objects. This
/// module is the single place where those objects turn into `Habit`s and
/// back, so a change in the stored shape never reaches the business logic.
///
/// Decoding never fails. Missing or ill-typed fields fall back to defaults:
/// empty strings, "daily" frequency, no creation time and empty history.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{json, Map, Value};

use crate::domain::{Frequency, Habit, HabitId};

/// A stored habit as a generic key-value mapping
pub type RawRecord = Map<String, Value>;

/// Date format used for history entries
pub const HISTORY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Habit fields recovered from a raw record, before an id is settled
///
/// The id stays optional here because legacy records may lack one; the
/// store decides which id the habit finally gets.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    pub id: Option<HabitId>,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub created_at: Option<DateTime<Utc>>,
    pub history: Vec<NaiveDate>,
}

impl DecodedRecord {
    /// Turn the decoded fields into a habit with the given id
    pub fn into_habit(self, id: HabitId) -> Habit {
        Habit::from_existing(
            id,
            self.name,
            self.description,
            self.frequency,
            self.created_at,
            self.history,
        )
    }
}

/// Decode a raw record, substituting defaults for anything missing or invalid
pub fn decode_record(record: &RawRecord) -> DecodedRecord {
    let id = match record.get("id") {
        // The largest u64 has no successor, so the store could never hand
        // out an id above it; such records get a fresh id instead.
        Some(Value::Number(n)) => n
            .as_u64()
            .filter(|v| *v > 0 && *v < u64::MAX)
            .map(HabitId),
        Some(Value::Null) | None => None,
        Some(other) => {
            tracing::debug!("Ignoring non-numeric habit id: {}", other);
            None
        }
    };

    DecodedRecord {
        id,
        name: string_field(record, "name"),
        description: string_field(record, "description"),
        frequency: Frequency::new(string_field(record, "frequency")),
        created_at: record
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        history: record
            .get("history")
            .and_then(Value::as_array)
            .map(|entries| parse_history(entries))
            .unwrap_or_default(),
    }
}

/// Encode a habit as a raw record
///
/// `today` is needed because the stored `is_done_today` flag is derived from
/// the history at the moment of writing.
pub fn encode_habit(habit: &Habit, today: NaiveDate) -> RawRecord {
    let history: Vec<String> = habit
        .history()
        .iter()
        .map(|d| d.format(HISTORY_DATE_FORMAT).to_string())
        .collect();

    let mut record = Map::new();
    record.insert("id".to_string(), json!(habit.id().value()));
    record.insert("name".to_string(), json!(habit.name()));
    record.insert("description".to_string(), json!(habit.description()));
    record.insert("frequency".to_string(), json!(habit.frequency().as_str()));
    record.insert("is_done_today".to_string(), json!(habit.is_done_on(today)));
    record.insert(
        "created_at".to_string(),
        json!(habit.created_at().map(|t| t.to_rfc3339())),
    );
    record.insert("history".to_string(), json!(history));
    record
}

fn string_field(record: &RawRecord, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Parse a creation timestamp
///
/// Accepts RFC 3339 as well as naive ISO date-times (taken as UTC), which
/// older files contain.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, HISTORY_DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    tracing::debug!("Ignoring unparseable created_at: {}", raw);
    None
}

/// Parse history entries, dropping invalid dates and repeated days
///
/// The result is sorted oldest first whatever order the file had.
fn parse_history(entries: &[Value]) -> Vec<NaiveDate> {
    let mut history: Vec<NaiveDate> = entries
        .iter()
        .filter_map(|entry| {
            let raw = entry.as_str()?;
            match NaiveDate::parse_from_str(raw, HISTORY_DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::debug!("Dropping invalid history entry: {}", raw);
                    None
                }
            }
        })
        .collect();
    history.sort_unstable();
    history.dedup();
    history
}
