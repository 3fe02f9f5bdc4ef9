//! Assignment storage: backends and the policy object on top of them.
//!
//! [`AssignmentStore`] is the single place that decides what may be written:
//!
//! - `get` never creates anything
//! - `reset` always replaces, drawing something new when possible
//! - `import` only fills an empty slot, and only with a valid derangement
//!
//! The same policy runs over the server file and over the client cache.

mod backend;
mod file;
mod memory;

pub use backend::AssignmentBackend;
pub use file::{write_atomic, FileBackend};
pub use memory::MemoryBackend;

use crate::assignment::Assignment;
use crate::config::DrawConfig;
use crate::derangement;
use crate::error::{CoreError, CoreResult};
use crate::participant::Roster;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

/// Outcome of [`AssignmentStore::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    /// The freshly stored assignment.
    pub assignment: Assignment,
    /// True if the new draw is identical to the one it replaced.
    pub repeated: bool,
}

/// Validating store for the current assignment.
///
/// # Thread Safety
///
/// Writers (`reset`, `import`, `replace`, `clear`) are serialised by an
/// internal mutex, which also guards the random number generator. Reads go
/// straight to the backend.
pub struct AssignmentStore<B: AssignmentBackend> {
    backend: B,
    config: DrawConfig,
    writer: Mutex<StdRng>,
}

impl<B: AssignmentBackend> AssignmentStore<B> {
    /// Creates a store over `backend`, seeding its generator from OS entropy.
    pub fn new(backend: B, config: DrawConfig) -> Self {
        Self {
            backend,
            config,
            writer: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reseeds the generator deterministically.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        *self.writer.lock() = StdRng::seed_from_u64(seed);
        self
    }

    /// Returns the draw configuration.
    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Returns the roster draws are made over.
    pub fn roster(&self) -> &Roster {
        &self.config.roster
    }

    /// Returns the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the stored assignment, if a valid one exists.
    ///
    /// Undecodable data, or an assignment that does not match the roster, is
    /// logged and reported as absent.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend cannot be read at all.
    pub fn get(&self) -> CoreResult<Option<Assignment>> {
        let stored = match self.backend.load() {
            Ok(stored) => stored,
            Err(CoreError::Corrupted(reason)) => {
                warn!(%reason, "ignoring unreadable assignment");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match stored {
            Some(assignment) => match assignment.validate(&self.config.roster) {
                Ok(()) => Ok(Some(assignment)),
                Err(reason) => {
                    warn!(%reason, "ignoring stored assignment that does not match the roster");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Discards the current assignment and stores a new draw.
    ///
    /// The new draw differs from the discarded one whenever the roster
    /// allows it; [`ResetOutcome::repeated`] is set otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoDerangement`] for rosters that admit no
    /// derangement, or a backend error. On error the stored assignment is
    /// left as it was.
    pub fn reset(&self) -> CoreResult<ResetOutcome> {
        let mut rng = self.writer.lock();

        let previous = self.get()?;
        let draw = derangement::generate(
            self.config.roster.members(),
            previous.as_ref(),
            self.config.max_attempts,
            &mut *rng,
        )?;
        self.backend.save(&draw.assignment)?;

        info!(
            attempts = draw.attempts,
            repeated = draw.repeated,
            replaced = previous.is_some(),
            "new assignment drawn"
        );

        Ok(ResetOutcome {
            assignment: draw.assignment,
            repeated: draw.repeated,
        })
    }

    /// Stores an externally supplied assignment if the slot is empty.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Invalid`] if `candidate` is not a derangement over the roster
    /// - [`CoreError::Conflict`] if an assignment is already stored
    pub fn import(&self, candidate: Assignment) -> CoreResult<Assignment> {
        candidate.validate(&self.config.roster)?;

        let _writer = self.writer.lock();
        if let Some(existing) = self.get()? {
            return Err(CoreError::Conflict { existing });
        }

        self.backend.save(&candidate)?;
        info!(participants = candidate.len(), "assignment imported");
        Ok(candidate)
    }

    /// Overwrites the stored assignment with a validated copy.
    ///
    /// Used to cache an authoritative assignment obtained elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Invalid`] for invalid assignments, or a backend error.
    pub fn replace(&self, assignment: &Assignment) -> CoreResult<()> {
        assignment.validate(&self.config.roster)?;

        let _writer = self.writer.lock();
        self.backend.save(assignment)
    }

    /// Removes the stored assignment.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn clear(&self) -> CoreResult<()> {
        let _writer = self.writer.lock();
        self.backend.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::participant::Participant;

    fn assignment(pairs: &[(&str, &str)]) -> Assignment {
        pairs
            .iter()
            .map(|(g, r)| (Participant::new(*g), Participant::new(*r)))
            .collect()
    }

    fn cycle() -> Assignment {
        assignment(&[("ibo", "adnan"), ("adnan", "ahmet"), ("ahmet", "ibo")])
    }

    fn store() -> AssignmentStore<MemoryBackend> {
        AssignmentStore::new(MemoryBackend::new(), DrawConfig::default()).with_seed(42)
    }

    #[test]
    fn get_never_creates() {
        let store = store();
        assert!(store.get().unwrap().is_none());
        assert!(store.get().unwrap().is_none());
        assert!(store.backend().load().unwrap().is_none());
    }

    #[test]
    fn reset_on_empty_store_draws() {
        let store = store();
        let outcome = store.reset().unwrap();
        assert!(!outcome.repeated);
        assert_eq!(outcome.assignment.validate(store.roster()), Ok(()));
        assert_eq!(store.get().unwrap(), Some(outcome.assignment));
    }

    #[test]
    fn reset_replaces_previous() {
        let store = AssignmentStore::new(
            MemoryBackend::with_assignment(cycle()),
            DrawConfig::default(),
        );

        let outcome = store.reset().unwrap();
        assert_eq!(
            outcome.assignment,
            assignment(&[("ibo", "ahmet"), ("adnan", "ibo"), ("ahmet", "adnan")])
        );
        assert_eq!(store.get().unwrap(), Some(outcome.assignment));
    }

    #[test]
    fn reset_flags_repeat_for_two_people() {
        let roster = Roster::new(["ibo", "adnan"]).unwrap();
        let only = assignment(&[("ibo", "adnan"), ("adnan", "ibo")]);
        let store = AssignmentStore::new(
            MemoryBackend::with_assignment(only.clone()),
            DrawConfig::new().with_roster(roster).with_max_attempts(20),
        );

        let outcome = store.reset().unwrap();
        assert!(outcome.repeated);
        assert_eq!(outcome.assignment, only);
    }

    #[test]
    fn failed_draw_keeps_stored_data() {
        let roster = Roster::new(["ibo"]).unwrap();
        let store = AssignmentStore::new(
            MemoryBackend::with_assignment(assignment(&[("ibo", "ibo")])),
            DrawConfig::new().with_roster(roster),
        );

        assert!(matches!(
            store.reset(),
            Err(CoreError::NoDerangement { .. })
        ));
        assert_eq!(
            store.backend().load().unwrap(),
            Some(assignment(&[("ibo", "ibo")]))
        );
    }

    #[test]
    fn failed_save_keeps_previous_assignment() {
        struct ReadOnly(MemoryBackend);

        impl AssignmentBackend for ReadOnly {
            fn load(&self) -> CoreResult<Option<Assignment>> {
                self.0.load()
            }

            fn save(&self, _assignment: &Assignment) -> CoreResult<()> {
                let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
                Err(err.into())
            }

            fn clear(&self) -> CoreResult<()> {
                self.0.clear()
            }
        }

        let store = AssignmentStore::new(
            ReadOnly(MemoryBackend::with_assignment(cycle())),
            DrawConfig::default(),
        );

        assert!(matches!(store.reset(), Err(CoreError::Io(_))));
        assert_eq!(store.get().unwrap(), Some(cycle()));
    }

    #[test]
    fn import_into_empty_store() {
        let store = store();
        let imported = store.import(cycle()).unwrap();
        assert_eq!(imported, cycle());
        assert_eq!(store.get().unwrap(), Some(cycle()));
    }

    #[test]
    fn import_conflicts_with_existing() {
        let store = store();
        let current = store.reset().unwrap().assignment;

        match store.import(cycle()) {
            Err(CoreError::Conflict { existing }) => assert_eq!(existing, current),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(store.get().unwrap(), Some(current));
    }

    #[test]
    fn import_validates_before_conflict() {
        let store = store();
        store.reset().unwrap();

        let err = store
            .import(assignment(&[("ibo", "ibo"), ("adnan", "ahmet"), ("ahmet", "adnan")]))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Invalid(ValidationError::SelfAssignment(_))
        ));
    }

    #[test]
    fn invalid_stored_data_reads_as_absent() {
        let store = AssignmentStore::new(
            MemoryBackend::with_assignment(assignment(&[("ibo", "adnan")])),
            DrawConfig::default(),
        );
        assert!(store.get().unwrap().is_none());

        // the slot counts as empty for import too
        store.import(cycle()).unwrap();
        assert_eq!(store.get().unwrap(), Some(cycle()));
    }

    #[test]
    fn replace_overwrites_but_validates() {
        let store = store();
        store.reset().unwrap();

        store.replace(&cycle()).unwrap();
        assert_eq!(store.get().unwrap(), Some(cycle()));

        assert!(store.replace(&assignment(&[("ibo", "adnan")])).is_err());
        assert_eq!(store.get().unwrap(), Some(cycle()));
    }

    #[test]
    fn clear_empties_store() {
        let store = store();
        store.reset().unwrap();
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }
}
