/// SQLite implementation of the habit storage interface
///
/// Each raw record becomes one row of the `habits` table. A save replaces
/// every row inside a single transaction, so readers never see a half
/// written collection.

use std::path::Path;
use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use crate::domain::RawRecord;
use crate::storage::{migrations, HabitStorage, StorageError};

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

/// Column values of one `habits` row
struct HabitRow {
    id: Option<i64>,
    name: Option<String>,
    description: Option<String>,
    frequency: Option<String>,
    is_done_today: Option<bool>,
    created_at: Option<String>,
    history: Option<String>,
}

impl SqliteStorage {
    /// Open (or create) the database at `db_path` and bring its schema up to date
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(Self { conn })
    }

    /// Database that lives only as long as this value
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn read_rows(&self) -> Result<Vec<RawRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, frequency, is_done_today, created_at, history
             FROM habits ORDER BY position ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(HabitRow {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                frequency: row.get(3)?,
                is_done_today: row.get(4)?,
                created_at: row.get(5)?,
                history: row.get(6)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(Self::row_to_record(row?));
        }
        Ok(records)
    }

    fn row_to_record(row: HabitRow) -> RawRecord {
        let mut record = Map::new();
        if let Some(id) = row.id {
            record.insert("id".to_string(), Value::from(id));
        }
        if let Some(name) = row.name {
            record.insert("name".to_string(), Value::from(name));
        }
        if let Some(description) = row.description {
            record.insert("description".to_string(), Value::from(description));
        }
        if let Some(frequency) = row.frequency {
            record.insert("frequency".to_string(), Value::from(frequency));
        }
        if let Some(done) = row.is_done_today {
            record.insert("is_done_today".to_string(), Value::from(done));
        }
        if let Some(created_at) = row.created_at {
            record.insert("created_at".to_string(), Value::from(created_at));
        }
        if let Some(history) = row.history {
            match serde_json::from_str::<Value>(&history) {
                Ok(value) => {
                    record.insert("history".to_string(), value);
                }
                Err(e) => tracing::debug!("Dropping unreadable history column: {}", e),
            }
        }
        record
    }

    fn record_to_row(record: &RawRecord) -> Result<HabitRow, StorageError> {
        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

        let history = match record.get("history") {
            Some(value @ Value::Array(_)) => Some(serde_json::to_string(value)?),
            _ => None,
        };

        Ok(HabitRow {
            id: record.get("id").and_then(Value::as_i64),
            name: text("name"),
            description: text("description"),
            frequency: text("frequency"),
            is_done_today: record.get("is_done_today").and_then(Value::as_bool),
            created_at: text("created_at"),
            history,
        })
    }
}

impl HabitStorage for SqliteStorage {
    fn load(&self) -> Vec<RawRecord> {
        match self.read_rows() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Could not read habits from database, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&mut self, records: &[RawRecord]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM habits", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO habits (
                    position, id, name, description, frequency, is_done_today, created_at, history
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;

            for (position, record) in records.iter().enumerate() {
                let row = Self::record_to_row(record)?;
                stmt.execute(params![
                    position as i64,
                    row.id,
                    row.name,
                    row.description,
                    row.frequency,
                    row.is_done_today,
                    row.created_at,
                    row.history,
                ])?;
            }
        }

        tx.commit()?;
        tracing::debug!("Saved {} habits to database", records.len());
        Ok(())
    }
}
