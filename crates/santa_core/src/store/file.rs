//! File-based backend for persistent storage.

use super::backend::AssignmentBackend;
use crate::assignment::Assignment;
use crate::error::{CoreError, CoreResult};
use parking_lot::RwLock;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keeps the assignment as a single pretty-printed JSON object on disk.
///
/// # Durability
///
/// `save` writes a sibling temp file, syncs it, then renames it over the
/// target, so readers never observe a half-written assignment.
///
/// # Thread Safety
///
/// Access from one process is serialised by an internal lock. Separate
/// processes sharing the file race and the last write wins.
///
/// # Example
///
/// ```no_run
/// use santa_core::{AssignmentBackend, FileBackend};
///
/// let backend = FileBackend::new("assignments.json");
/// let current = backend.load().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileBackend {
    /// Creates a backend for `path`. The file is not touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Replaces `path` with `data` without exposing a partial write.
///
/// The data goes to `<path>.tmp`, is synced, then renamed over `path`.
/// Missing parent directories are created.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut temp_name = path.as_os_str().to_os_string();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let mut file = File::create(&temp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)
}

impl AssignmentBackend for FileBackend {
    fn load(&self) -> CoreResult<Option<Assignment>> {
        let _guard = self.lock.read();

        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no assignment file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if data.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| CoreError::Corrupted(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, assignment: &Assignment) -> CoreResult<()> {
        let _guard = self.lock.write();

        let data = serde_json::to_string_pretty(assignment)
            .map_err(|e| CoreError::Corrupted(e.to_string()))?;
        write_atomic(&self.path, data.as_bytes())?;
        debug!(path = %self.path.display(), "assignment written");
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        let _guard = self.lock.write();

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
