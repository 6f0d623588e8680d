/// JSON file implementation of the habit storage interface
///
/// Records live in a single document of the form `{"habits": [...]}`. The
/// whole file is rewritten on every save.

use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::RawRecord;
use crate::storage::{HabitStorage, StorageError};

/// On-disk document layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct HabitDocument {
    #[serde(default)]
    habits: Vec<Value>,
}

/// JSON-file-based storage
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage backed by the file at `path`
    ///
    /// The file does not need to exist yet; it is created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<Option<HabitDocument>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

impl HabitStorage for JsonFileStorage {
    fn load(&self) -> Vec<RawRecord> {
        let document = match self.read_document() {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::debug!("No habit file at {}, starting empty", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(
                    "Could not read habit file {}, starting empty: {}",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        document
            .habits
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(record) => Some(record),
                other => {
                    tracing::warn!("Skipping non-object habit entry: {}", other);
                    None
                }
            })
            .collect()
    }

    fn save(&mut self, records: &[RawRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = HabitDocument {
            habits: records.iter().cloned().map(Value::Object).collect(),
        };
        let contents = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, contents)?;

        tracing::debug!("Saved {} habits to {}", records.len(), self.path.display());
        Ok(())
    }
}
