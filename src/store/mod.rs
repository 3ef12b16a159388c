/// JSON file persistence for todos and schedule items.
///
/// Mirrors the app's mobile heritage: two flat JSON documents under the
/// user data dir, loaded once at startup and rewritten after each mutation.
use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::tasks::{ScheduledItem, Todo};

const TODOS_FILE: &str = "todos.json";
const SCHEDULE_FILE: &str = "schedule.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("store decode: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Store rooted at the platform data dir (`…/onestep`).
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("onestep");
        Self::open(dir)
    }

    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn load_todos(&self) -> Result<Vec<Todo>, StoreError> {
        self.read_list(TODOS_FILE)
    }

    pub fn save_todos(&self, todos: &[Todo]) -> Result<(), StoreError> {
        self.write_list(TODOS_FILE, todos)
    }

    pub fn load_schedule(&self) -> Result<Vec<ScheduledItem>, StoreError> {
        self.read_list(SCHEDULE_FILE)
    }

    pub fn save_schedule(&self, items: &[ScheduledItem]) -> Result<(), StoreError> {
        self.write_list(SCHEDULE_FILE, items)
    }

    /// Missing file reads as an empty list (first launch).
    fn read_list<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&fs::read_to_string(&path)?)?)
    }

    fn write_list<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.dir.join(name);
        let body = serde_json::to_string_pretty(items)?;
        write_atomic(&path, &body)?;
        tracing::debug!(file = %path.display(), count = items.len(), "store saved");
        Ok(())
    }
}

/// Write via a sibling temp file and rename, so a crash mid-write never
/// truncates the previous copy.
fn write_atomic(path: &Path, body: &str) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Priority;
    use chrono::{Duration, Local};

    #[test]
    fn test_round_trip_todos() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let mut todo = Todo::new("pack bags", Priority::Medium);
        todo.due_date = Some(Local::now() + Duration::days(1));
        store.save_todos(&[todo.clone()]).unwrap();

        let loaded = store.load_todos().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, todo.id);
        assert_eq!(loaded[0].title, "pack bags");
        assert_eq!(loaded[0].priority, Priority::Medium);
        assert_eq!(
            loaded[0].due_date.map(|d| d.date_naive()),
            todo.due_date.map(|d| d.date_naive())
        );
    }

    #[test]
    fn test_round_trip_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        let start = Local::now();
        let item = ScheduledItem::new("dentist", start, start + Duration::hours(1));
        store.save_schedule(&[item.clone()]).unwrap();

        let loaded = store.load_schedule().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, item.id);
        assert_eq!(loaded[0].duration_minutes(), 60);
    }

    #[test]
    fn test_missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.load_todos().unwrap().is_empty());
        assert!(store.load_schedule().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();

        store
            .save_todos(&[Todo::new("a", Priority::Low), Todo::new("b", Priority::Low)])
            .unwrap();
        store.save_todos(&[Todo::new("c", Priority::High)]).unwrap();

        let loaded = store.load_todos().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "c");
    }
}
