use super::persistence::PersistenceError;
use crate::domain::{HabitStore, MonthKey};
use log::info;
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    /// Writes one month's habits as `name,done` rows, header first.
    pub fn export_month(store: &HabitStore, key: MonthKey, path: &Path) -> Result<usize, PersistenceError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["name", "done"])?;

        let habits = store.list_habits(key);
        for habit in habits {
            writer.write_record([habit.name.as_str(), if habit.done { "true" } else { "false" }])?;
        }
        writer.flush().map_err(|e| PersistenceError::io(path, e))?;

        info!(
            "event=export status=ok month={} rows={} path={}",
            key,
            habits.len(),
            path.display()
        );
        Ok(habits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_month() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("may.csv");
        let may = MonthKey::new(2025, 5).unwrap();

        let mut store = HabitStore::default();
        store.add_habit(may, "Exercise");
        store.add_habit(may, "Read, then sleep");
        store.mark_done(may, 0);
        store.add_habit(may.next(), "Not exported");

        let rows = CsvExporter::export_month(&store, may, &path).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name,done\nExercise,true\n\"Read, then sleep\",false\n");
    }

    #[test]
    fn test_export_empty_month_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        let rows = CsvExporter::export_month(&HabitStore::default(), MonthKey::new(2025, 1).unwrap(), &path)
            .unwrap();
        assert_eq!(rows, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,done\n");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let result = CsvExporter::export_month(&HabitStore::default(), MonthKey::current(), &path);
        assert!(matches!(result, Err(PersistenceError::Csv(_))));
    }
}
