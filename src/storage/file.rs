use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{entry_size, KeyValueStore};
use crate::error::{AppError, AppResult};

/// Key/value namespace persisted to a single JSON file
///
/// The file holds one JSON object of string values. Each write reads the
/// current map, applies the change and replaces the file through a rename,
/// so a concurrent writer in another process loses to whichever renames last.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: usize,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            path: path.into(),
            quota_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> AppResult<BTreeMap<String, String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&text).map_err(|e| {
            AppError::Storage(format!(
                "{} is not a key/value object: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Each writer stages into its own temp file in the target directory
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut staged, map)?;
        staged.flush()?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut map = self.read_map()?;

        let others: usize = map
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| entry_size(k, v))
            .sum();
        let needed = others + entry_size(key, value);
        if needed > self.quota_bytes {
            return Err(AppError::QuotaExceeded {
                needed,
                limit: self.quota_bytes,
            });
        }

        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)?;

        tracing::debug!(key = %key, path = %self.path.display(), "Wrote local state");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTA: usize = 5 * 1024 * 1024;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"), QUOTA);
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStore::new(&path, QUOTA);
        store.set("cineflix_chat_guest", "[]").unwrap();

        let reopened = FileStore::new(&path, QUOTA);
        assert_eq!(
            reopened.get("cineflix_chat_guest").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"), QUOTA);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("3"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_quota_exceeded_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"), 8);
        store.set("k", "small").unwrap();

        let err = store.set("k", "much too large").unwrap_err();
        assert!(matches!(err, AppError::QuotaExceeded { limit: 8, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStore::new(&path, QUOTA);
        store.set("a", "1").unwrap();

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.get("a").unwrap(), None);

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_garbage_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path, QUOTA);
        assert!(matches!(store.get("a"), Err(AppError::Storage(_))));
    }

    #[test]
    fn test_writes_leave_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"), QUOTA);
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("state.json")]);
    }

    #[test]
    fn test_concurrent_writers_always_leave_a_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let handles: Vec<_> = (0..4)
            .map(|writer| {
                let store = FileStore::new(&path, QUOTA);
                std::thread::spawn(move || {
                    for round in 0..25 {
                        store
                            .set(&format!("writer_{}", writer), &round.to_string())
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Updates may be lost to a later writer, but the file always parses
        let store = FileStore::new(&path, QUOTA);
        let survivors = (0..4)
            .filter_map(|writer| store.get(&format!("writer_{}", writer)).unwrap())
            .collect::<Vec<_>>();
        assert!(!survivors.is_empty());
        assert!(survivors
            .iter()
            .all(|value| value.parse::<u32>().map_or(false, |round| round < 25)));
    }
}
