//! Local key/value cache, the client-side home of the assignment.

use parking_lot::RwLock;
use santa_core::{write_atomic, Assignment, AssignmentBackend, CoreError, CoreResult};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key the assignment is stored under.
pub const CACHE_KEY: &str = "jb_assignments";

/// A JSON object file of independent keys, one of which holds the assignment.
///
/// Other keys in the file are left untouched, so the cache can share a file
/// with unrelated client state. A file that is not a JSON object is reported
/// as corrupted on read and replaced on the next write.
#[derive(Debug)]
pub struct CacheBackend {
    path: PathBuf,
    key: String,
    lock: RwLock<()>,
}

impl CacheBackend {
    /// Creates a cache over `path` using `key`.
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            lock: RwLock::new(()),
        }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the key the assignment lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_entries(&self) -> CoreResult<Map<String, Value>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if data.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&data) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(CoreError::Corrupted(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(CoreError::Corrupted(format!("{}: {e}", self.path.display()))),
        }
    }

    fn entries_for_write(&self) -> CoreResult<Map<String, Value>> {
        match self.read_entries() {
            Err(CoreError::Corrupted(reason)) => {
                warn!(%reason, "discarding unreadable cache");
                Ok(Map::new())
            }
            other => other,
        }
    }

    fn write_entries(&self, entries: Map<String, Value>) -> CoreResult<()> {
        let data = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|e| CoreError::Corrupted(e.to_string()))?;
        write_atomic(&self.path, data.as_bytes())?;
        Ok(())
    }
}

impl AssignmentBackend for CacheBackend {
    fn load(&self) -> CoreResult<Option<Assignment>> {
        let _guard = self.lock.read();

        let entries = self.read_entries()?;
        match entries.get(&self.key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| CoreError::Corrupted(format!("cache key {}: {e}", self.key))),
        }
    }

    fn save(&self, assignment: &Assignment) -> CoreResult<()> {
        let _guard = self.lock.write();

        let value =
            serde_json::to_value(assignment).map_err(|e| CoreError::Corrupted(e.to_string()))?;
        let mut entries = self.entries_for_write()?;
        entries.insert(self.key.clone(), value);
        self.write_entries(entries)?;

        debug!(path = %self.path.display(), key = %self.key, "assignment cached");
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        let _guard = self.lock.write();

        let mut entries = self.entries_for_write()?;
        if entries.remove(&self.key).is_some() {
            self.write_entries(entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use santa_core::Participant;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample() -> Assignment {
        [("ibo", "adnan"), ("adnan", "ahmet"), ("ahmet", "ibo")]
            .iter()
            .map(|(g, r)| (Participant::new(*g), Participant::new(*r)))
            .collect()
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let cache = CacheBackend::new(dir.path().join("cache.json"), CACHE_KEY);
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn stores_under_fixed_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let cache = CacheBackend::new(&path, CACHE_KEY);

        cache.save(&sample()).unwrap();
        assert_eq!(cache.load().unwrap(), Some(sample()));

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            json!({"jb_assignments": {"ibo": "adnan", "adnan": "ahmet", "ahmet": "ibo"}})
        );
    }

    #[test]
    fn other_keys_survive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let cache = CacheBackend::new(&path, CACHE_KEY);

        cache.save(&sample()).unwrap();
        cache.clear().unwrap();

        let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({"theme": "dark"}));
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn null_entry_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, r#"{"jb_assignments": null}"#).unwrap();
        assert!(CacheBackend::new(&path, CACHE_KEY).load().unwrap().is_none());
    }

    #[test]
    fn corrupted_cache_is_reported_then_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let cache = CacheBackend::new(&path, CACHE_KEY);

        assert!(matches!(cache.load(), Err(CoreError::Corrupted(_))));

        cache.save(&sample()).unwrap();
        assert_eq!(cache.load().unwrap(), Some(sample()));
    }

    #[test]
    fn clear_on_missing_file_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        CacheBackend::new(&path, CACHE_KEY).clear().unwrap();
        assert!(!path.exists());
    }
}
