//! In-memory backend for testing.

use super::backend::AssignmentBackend;
use crate::assignment::Assignment;
use crate::error::CoreResult;
use parking_lot::RwLock;

/// Keeps the assignment in memory only.
///
/// # Example
///
/// ```rust
/// use santa_core::{AssignmentBackend, MemoryBackend};
///
/// let backend = MemoryBackend::new();
/// assert!(backend.load().unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: RwLock<Option<Assignment>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend already holding `assignment`.
    ///
    /// The assignment is not validated, which makes this useful for
    /// exercising recovery from bad data.
    #[must_use]
    pub fn with_assignment(assignment: Assignment) -> Self {
        Self {
            slot: RwLock::new(Some(assignment)),
        }
    }
}

impl AssignmentBackend for MemoryBackend {
    fn load(&self) -> CoreResult<Option<Assignment>> {
        Ok(self.slot.read().clone())
    }

    fn save(&self, assignment: &Assignment) -> CoreResult<()> {
        *self.slot.write() = Some(assignment.clone());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        *self.slot.write() = None;
        Ok(())
    }
}
