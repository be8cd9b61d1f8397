use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The durable log of past runs.
///
/// Serialized as `{"commits": [...], "alreadyAdded": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    /// One `YYYY-MM-DD` entry per successful run.
    pub commits: Vec<String>,
    /// Phrases already committed, in the order they were used.
    #[serde(rename = "alreadyAdded")]
    pub already_added: Vec<String>,
}

impl StateRecord {
    /// The 1-based ordinal of the run about to be recorded.
    pub fn next_commit_count(&self) -> u64 {
        self.commits.len() as u64 + 1
    }

    pub fn last_commit(&self) -> Option<&str> {
        self.commits.last().map(String::as_str)
    }

    /// Record a successful run in memory. Call [`StateStore::save`] to persist.
    pub fn record(&mut self, date: impl Into<String>, phrase: impl Into<String>) {
        self.commits.push(date.into());
        self.already_added.push(phrase.into());
    }
}

/// How [`StateStore::load`] obtained its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file parsed cleanly with both fields present.
    Intact,
    /// No file existed; an empty record was created and written.
    Created,
    /// Some fields were missing or malformed and were defaulted.
    Repaired,
    /// The file was unreadable; it was replaced with an empty record.
    Reset,
}

/// File-backed store for the [`StateRecord`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, creating or repairing the file as needed.
    pub fn load(&self) -> Result<StateRecord> {
        self.load_with_status().map(|(record, _)| record)
    }

    /// Like [`load`](Self::load), also reporting whether the file was created,
    /// repaired, or reset.
    pub fn load_with_status(&self) -> Result<(StateRecord, LoadStatus)> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "state file not found, creating a new one");
            let record = StateRecord::default();
            self.save(&record)?;
            return Ok((record, LoadStatus::Created));
        }

        let data = std::fs::read(&self.path)?;
        match parse_lenient(&data) {
            Some((record, repaired)) => {
                let status = if repaired {
                    LoadStatus::Repaired
                } else {
                    LoadStatus::Intact
                };
                Ok((record, status))
            }
            None => {
                warn!(
                    path = %self.path.display(),
                    "state file is corrupt, reinitializing with an empty record"
                );
                let record = StateRecord::default();
                self.save(&record)?;
                Ok((record, LoadStatus::Reset))
            }
        }
    }

    /// Read the record without creating or rewriting the file.
    ///
    /// A missing or unreadable file yields an empty record.
    pub fn peek(&self) -> Result<StateRecord> {
        if !self.path.exists() {
            return Ok(StateRecord::default());
        }
        let data = std::fs::read(&self.path)?;
        Ok(parse_lenient(&data)
            .map(|(record, _)| record)
            .unwrap_or_default())
    }

    /// Atomically replace the state file with `record`.
    pub fn save(&self, record: &StateRecord) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, record)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Parse a state file, defaulting each field independently.
///
/// Returns `None` when the content is not a JSON object at all, otherwise the
/// record and whether any field needed repair.
fn parse_lenient(data: &[u8]) -> Option<(StateRecord, bool)> {
    let value: Value = serde_json::from_slice(data).ok()?;
    let Value::Object(map) = value else {
        return None;
    };

    let mut repaired = false;
    let mut field = |name: &str| -> Vec<String> {
        match map.get(name) {
            Some(Value::Array(items)) => {
                let strings: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                if strings.len() != items.len() {
                    warn!(
                        field = name,
                        dropped = items.len() - strings.len(),
                        "dropping non-string entries from state file"
                    );
                    repaired = true;
                }
                strings
            }
            Some(_) => {
                warn!(field = name, "state field is not an array, resetting it");
                repaired = true;
                Vec::new()
            }
            None => {
                warn!(field = name, "state field missing, defaulting to empty");
                repaired = true;
                Vec::new()
            }
        }
    };

    let commits = field("commits");
    let already_added = field("alreadyAdded");
    Some((
        StateRecord {
            commits,
            already_added,
        },
        repaired,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StateStore {
        StateStore::new(dir.path().join("log.json"))
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let (record, status) = store.load_with_status().unwrap();
        assert_eq!(record, StateRecord::default());
        assert_eq!(status, LoadStatus::Created);

        let on_disk: Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk["commits"], Value::Array(vec![]));
        assert_eq!(on_disk["alreadyAdded"], Value::Array(vec![]));
    }

    #[test]
    fn test_load_intact_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"commits": ["2024-01-01"], "alreadyAdded": ["Ship it"]}"#,
        )
        .unwrap();

        let (record, status) = store.load_with_status().unwrap();
        assert_eq!(status, LoadStatus::Intact);
        assert_eq!(record.commits, vec!["2024-01-01"]);
        assert_eq!(record.already_added, vec!["Ship it"]);
    }

    #[test]
    fn test_missing_already_added_keeps_commits() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"commits": ["2024-01-01", "2024-01-02"]}"#).unwrap();

        let (record, status) = store.load_with_status().unwrap();
        assert_eq!(status, LoadStatus::Repaired);
        assert_eq!(record.commits, vec!["2024-01-01", "2024-01-02"]);
        assert!(record.already_added.is_empty());
    }

    #[test]
    fn test_wrong_type_field_is_defaulted_alone() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            r#"{"commits": "oops", "alreadyAdded": ["Keep me", 7]}"#,
        )
        .unwrap();

        let (record, status) = store.load_with_status().unwrap();
        assert_eq!(status, LoadStatus::Repaired);
        assert!(record.commits.is_empty());
        assert_eq!(record.already_added, vec!["Keep me"]);
    }

    #[test]
    fn test_corrupt_file_is_reset_and_rewritten() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        let (record, status) = store.load_with_status().unwrap();
        assert_eq!(status, LoadStatus::Reset);
        assert_eq!(record, StateRecord::default());

        // The rewritten file loads cleanly.
        let (_, status) = store.load_with_status().unwrap();
        assert_eq!(status, LoadStatus::Intact);
    }

    #[test]
    fn test_non_object_json_is_reset() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "[1, 2, 3]").unwrap();

        let (_, status) = store.load_with_status().unwrap();
        assert_eq!(status, LoadStatus::Reset);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut record = StateRecord::default();
        record.record("2024-03-04", "Keep shipping");
        store.save(&record).unwrap();

        assert_eq!(store.load().unwrap(), record);
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"alreadyAdded\""));
        assert!(text.contains("\n  \"commits\""));
    }

    #[test]
    fn test_peek_does_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.peek().unwrap(), StateRecord::default());
        assert!(!store.path().exists());

        std::fs::write(store.path(), "garbage").unwrap();
        assert_eq!(store.peek().unwrap(), StateRecord::default());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "garbage");
    }

    #[test]
    fn test_next_commit_count() {
        let mut record = StateRecord::default();
        assert_eq!(record.next_commit_count(), 1);
        record.record("2024-01-01", "a");
        record.record("2024-01-02", "b");
        assert_eq!(record.next_commit_count(), 3);
        assert_eq!(record.last_commit(), Some("2024-01-02"));
    }
}
