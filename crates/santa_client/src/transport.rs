//! Transport layer abstraction for talking to the assignment server.

use crate::error::{ClientError, ClientResult};
use santa_core::{Assignment, AssignmentStore, CoreError, DrawConfig, MemoryBackend};
use santa_protocol::{ImportResponse, ResetResponse};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Handles communication with the assignment server.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (HTTP, in-process, mock for testing).
pub trait AssignmentTransport: Send + Sync {
    /// Reads the server's assignment. `None` means the server is empty.
    fn fetch(&self) -> ClientResult<Option<Assignment>>;

    /// Asks the server to draw a new assignment.
    fn reset(&self) -> ClientResult<ResetResponse>;

    /// Uploads `assignment` to an empty server.
    fn import(&self, assignment: &Assignment) -> ClientResult<ImportResponse>;
}

impl<T: AssignmentTransport + ?Sized> AssignmentTransport for Box<T> {
    fn fetch(&self) -> ClientResult<Option<Assignment>> {
        (**self).fetch()
    }

    fn reset(&self) -> ClientResult<ResetResponse> {
        (**self).reset()
    }

    fn import(&self, assignment: &Assignment) -> ClientResult<ImportResponse> {
        (**self).import(assignment)
    }
}

/// A mock transport for testing.
///
/// Behaves like a server backed by memory and can be switched offline, in
/// which case every call fails with [`ClientError::Transport`].
pub struct MockTransport {
    store: AssignmentStore<MemoryBackend>,
    online: AtomicBool,
    calls: AtomicUsize,
}

impl MockTransport {
    /// Creates an online mock with an empty server store.
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Creates an online mock whose server store uses `backend`.
    pub fn with_backend(backend: MemoryBackend) -> Self {
        Self {
            store: AssignmentStore::new(backend, DrawConfig::default()),
            online: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    /// Switches the mock on or off.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Returns the server-side assignment.
    pub fn server_assignment(&self) -> Option<Assignment> {
        self.store.get().ok().flatten()
    }

    /// Returns how many calls were attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> ClientResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ClientError::Transport("connection refused".into()))
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn server_error(err: CoreError) -> ClientError {
    match err {
        CoreError::Conflict { existing } => ClientError::ImportConflict { existing },
        CoreError::Invalid(reason) => ClientError::Server {
            status: 400,
            message: reason.to_string(),
        },
        other => ClientError::Server {
            status: 500,
            message: other.to_string(),
        },
    }
}

impl AssignmentTransport for MockTransport {
    fn fetch(&self) -> ClientResult<Option<Assignment>> {
        self.check_online()?;
        self.store.get().map_err(server_error)
    }

    fn reset(&self) -> ClientResult<ResetResponse> {
        self.check_online()?;
        let outcome = self.store.reset().map_err(server_error)?;
        Ok(ResetResponse::new(outcome.assignment, outcome.repeated))
    }

    fn import(&self, assignment: &Assignment) -> ClientResult<ImportResponse> {
        self.check_online()?;
        let stored = self
            .store
            .import(assignment.clone())
            .map_err(server_error)?;
        Ok(ImportResponse::new(stored))
    }
}
