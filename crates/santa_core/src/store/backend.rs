//! Storage backend trait definition.

use crate::assignment::Assignment;
use crate::error::CoreResult;

/// A place where at most one assignment is kept.
///
/// Backends are dumb slots: they neither validate nor generate. All policy
/// (validation, conflict rules, drawing) lives in
/// [`super::AssignmentStore`].
///
/// # Invariants
///
/// - `load` after `save(a)` returns `Some(a)`
/// - `load` after `clear` returns `None`
/// - Backends must be `Send + Sync` so one store can serve many requests
///
/// # Implementors
///
/// - [`super::MemoryBackend`] - For testing
/// - [`super::FileBackend`] - For the server's JSON file
pub trait AssignmentBackend: Send + Sync {
    /// Reads the stored assignment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Corrupted`] if stored bytes cannot be
    /// decoded, or an I/O error.
    fn load(&self) -> CoreResult<Option<Assignment>>;

    /// Replaces the stored assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment could not be made durable.
    fn save(&self, assignment: &Assignment) -> CoreResult<()>;

    /// Removes the stored assignment. Clearing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage could not be updated.
    fn clear(&self) -> CoreResult<()>;
}

impl<B: AssignmentBackend + ?Sized> AssignmentBackend for Box<B> {
    fn load(&self) -> CoreResult<Option<Assignment>> {
        (**self).load()
    }

    fn save(&self, assignment: &Assignment) -> CoreResult<()> {
        (**self).save(assignment)
    }

    fn clear(&self) -> CoreResult<()> {
        (**self).clear()
    }
}
