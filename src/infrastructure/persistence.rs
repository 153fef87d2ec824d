use crate::domain::HabitStore;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the habit document, relative to the working directory.
pub const DEFAULT_HABITS_FILE: &str = "habits.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

impl PersistenceError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reads and writes the month-keyed habit document.
pub struct FileRepository;

impl FileRepository {
    /// Writes the whole store to `path`, replacing any existing file.
    ///
    /// Output is UTF-8 JSON indented with four spaces; non-ASCII habit
    /// names are written as-is.
    pub fn save_store(store: &HabitStore, path: &Path) -> Result<(), PersistenceError> {
        let mut json = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut json, formatter);
        store.serialize(&mut serializer)?;

        fs::write(path, &json).map_err(|e| PersistenceError::io(path, e))?;
        info!(
            "event=save status=ok path={} months={} bytes={}",
            path.display(),
            store.len(),
            json.len()
        );
        Ok(())
    }

    /// Loads the store from `path`.
    ///
    /// A missing file or a document that is not valid habit JSON yields an
    /// empty store. Other read failures are returned so callers never
    /// overwrite a file they could not read.
    pub fn load_store(path: &Path) -> Result<HabitStore, PersistenceError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("event=load status=missing path={}", path.display());
                return Ok(HabitStore::default());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("event=load status=invalid path={} reason={}", path.display(), e);
                return Ok(HabitStore::default());
            }
            Err(e) => return Err(PersistenceError::io(path, e)),
        };

        match serde_json::from_str::<HabitStore>(&content) {
            Ok(store) => {
                info!(
                    "event=load status=ok path={} months={}",
                    path.display(),
                    store.len()
                );
                Ok(store)
            }
            Err(e) => {
                warn!("event=load status=invalid path={} reason={}", path.display(), e);
                Ok(HabitStore::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitRecord, MonthKey};
    use tempfile::TempDir;

    fn key(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = HabitStore::default();
        store.add_habit(key(2025, 5), "Exercise");
        store.add_habit(key(2025, 5), "Read");
        store.add_habit(key(2025, 5), "Walk");
        store.mark_done(key(2025, 5), 0);
        store.delete_habit(key(2025, 5), 1);
        store.add_habit(key(2024, 12), "Journal");
        store.add_habit(key(2026, 1), "Temp");
        store.delete_habit(key(2026, 1), 0);

        FileRepository::save_store(&store, &path).unwrap();
        let loaded = FileRepository::load_store(&path).unwrap();

        assert_eq!(loaded, store);
        assert_eq!(
            loaded.list_habits(key(2025, 5)),
            &[
                HabitRecord { name: "Exercise".to_string(), done: true },
                HabitRecord { name: "Walk".to_string(), done: false },
            ]
        );
        assert!(loaded.contains_month(key(2026, 1)));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileRepository::load_store(&dir.path().join("nope.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_invalid_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");

        for content in ["", "{not json", "[]", r#"{"2025-5": 3}"#] {
            fs::write(&path, content).unwrap();
            let store = FileRepository::load_store(&path).unwrap();
            assert!(store.is_empty(), "expected empty store for {content:?}");
        }
    }

    #[test]
    fn test_load_non_utf8_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        assert!(FileRepository::load_store(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_unreadable_path_is_error() {
        let dir = TempDir::new().unwrap();
        let result = FileRepository::load_store(dir.path());
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }

    #[test]
    fn test_load_defaults_missing_done() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(&path, r#"{"2025-5": [{"name": "Exercise"}, {"name": "Read", "done": true}]}"#)
            .unwrap();

        let store = FileRepository::load_store(&path).unwrap();
        let habits = store.list_habits(key(2025, 5));
        assert!(!habits[0].done);
        assert!(habits[1].done);
    }

    #[test]
    fn test_save_keeps_non_ascii_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = HabitStore::default();
        store.add_habit(key(2025, 5), "Зарядка ☀");
        FileRepository::save_store(&store, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Зарядка ☀"));
        assert!(!content.contains("\\u"));
        assert!(content.contains("\"2025-5\""));
    }

    #[test]
    fn test_save_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = HabitStore::default();
        store.add_habit(key(2025, 5), "Read");
        FileRepository::save_store(&store, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n    \"2025-5\": ["));
        assert!(content.contains("\n            \"name\": \"Read\""));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(&path, "old contents that are much longer than the new document").unwrap();

        FileRepository::save_store(&HabitStore::default(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("habits.json");
        let result = FileRepository::save_store(&HabitStore::default(), &path);
        assert!(matches!(result, Err(PersistenceError::Io { .. })));
    }
}
