//! The draw client: server when available, local cache otherwise.

use crate::cache::CacheBackend;
use crate::config::{ClientConfig, SyncMode};
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpTransport, UreqClient};
use crate::input::{classify, Intent};
use crate::transport::AssignmentTransport;
use parking_lot::RwLock;
use santa_core::{Assignment, AssignmentStore, Participant};
use santa_protocol::{RESET_MESSAGE, RESET_REPEATED_MESSAGE};
use std::fmt;
use tracing::{debug, info, warn};

/// Where an assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Drawn or stored by the server.
    Server,
    /// Drawn or stored in the local cache.
    Local,
}

/// Result of asking the server for its assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFetch {
    /// The server holds an assignment; it has been cached locally.
    Found(Assignment),
    /// The server is empty.
    Empty {
        /// True if a local assignment exists that could be uploaded.
        import_available: bool,
    },
    /// The server could not be reached, answered with an error, or sent an
    /// assignment that does not match the roster.
    Unavailable(String),
    /// Local-only mode.
    Disabled,
}

/// State after [`DrawClient::startup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// The server's assignment is in use.
    Server(Assignment),
    /// The cached assignment is in use.
    Local {
        /// The cached assignment.
        assignment: Assignment,
        /// True if the assignment may be uploaded: the server is empty or
        /// could not be asked.
        can_import: bool,
    },
    /// No assignment exists anywhere.
    Empty,
}

/// A completed reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    /// The new assignment.
    pub assignment: Assignment,
    /// True if the draw repeated the previous assignment.
    pub repeated: bool,
    /// Who performed the draw.
    pub source: Source,
    /// Human-readable outcome.
    pub message: String,
}

/// One giver and their receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// The participant who asked.
    pub giver: Participant,
    /// Who they give to.
    pub receiver: Participant,
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.giver.display_name(),
            self.receiver.display_name()
        )
    }
}

/// Outcome of submitting text with [`DrawClient::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The reset keyword was entered and a new draw made.
    Reset(ResetReport),
    /// A participant name was entered.
    Assigned(Pairing),
    /// Valid text that is neither a name nor the keyword.
    Accepted(String),
}

/// Client over a local cache with optional server sync.
///
/// In [`SyncMode::ServerSync`] every operation tries the server first and
/// falls back to the cache when it fails. Server answers are written through
/// to the cache. In [`SyncMode::LocalOnly`] the server is never contacted.
pub struct DrawClient {
    config: ClientConfig,
    cache: AssignmentStore<CacheBackend>,
    transport: Option<Box<dyn AssignmentTransport>>,
    current: RwLock<Option<Assignment>>,
}

impl DrawClient {
    /// Creates a client that talks HTTP to `config.server_url`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(
            config.server_url.clone(),
            UreqClient::new(config.timeout),
        );
        Self::with_transport(config, Box::new(transport))
    }

    /// Creates a client with a custom transport.
    ///
    /// The transport is dropped in local-only mode.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn AssignmentTransport>) -> Self {
        let cache = AssignmentStore::new(
            CacheBackend::new(config.cache_path.clone(), config.cache_key.clone()),
            config.draw.clone(),
        );
        let transport = match config.mode {
            SyncMode::ServerSync => Some(transport),
            SyncMode::LocalOnly => None,
        };
        Self {
            config,
            cache,
            transport,
            current: RwLock::new(None),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the sync mode.
    pub fn mode(&self) -> SyncMode {
        self.config.mode
    }

    /// Returns the local cache store.
    pub fn cache(&self) -> &AssignmentStore<CacheBackend> {
        &self.cache
    }

    /// Returns the assignment currently in use, if any.
    pub fn current(&self) -> Option<Assignment> {
        self.current.read().clone()
    }

    /// Asks the server for its assignment and caches it when found.
    pub fn fetch_from_server(&self) -> ServerFetch {
        let Some(transport) = &self.transport else {
            return ServerFetch::Disabled;
        };

        match transport.fetch() {
            Ok(Some(assignment)) => match self.adopt(&assignment) {
                Ok(()) => ServerFetch::Found(assignment),
                Err(e) => {
                    warn!(error = %e, "ignoring server assignment");
                    ServerFetch::Unavailable(e.to_string())
                }
            },
            Ok(None) => {
                let import_available = matches!(self.cache.get(), Ok(Some(_)));
                ServerFetch::Empty { import_available }
            }
            Err(e) => {
                debug!(error = %e, "server fetch failed");
                ServerFetch::Unavailable(e.to_string())
            }
        }
    }

    /// Loads the assignment to use: the server's when reachable, else the cache.
    ///
    /// # Errors
    ///
    /// Returns an error only if the cache cannot be read.
    pub fn startup(&self) -> ClientResult<Startup> {
        let fetch = self.fetch_from_server();
        if let ServerFetch::Found(assignment) = fetch {
            return Ok(Startup::Server(assignment));
        }

        match self.cache.get()? {
            Some(assignment) => {
                *self.current.write() = Some(assignment.clone());
                let can_import = matches!(
                    fetch,
                    ServerFetch::Empty { .. } | ServerFetch::Unavailable(_)
                );
                Ok(Startup::Local {
                    assignment,
                    can_import,
                })
            }
            None => Ok(Startup::Empty),
        }
    }

    /// Validates submitted text and acts on it.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidInput`] if the text is rejected
    /// - errors from [`DrawClient::reset`] and [`DrawClient::lookup`]
    pub fn check(&self, input: &str) -> ClientResult<CheckOutcome> {
        let intent = classify(input, self.cache.roster(), &self.config.reset_keyword)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;

        match intent {
            Intent::Reset => self.reset().map(CheckOutcome::Reset),
            Intent::Lookup(participant) => self
                .lookup(participant.as_str())
                .map(CheckOutcome::Assigned),
            Intent::Other(text) => Ok(CheckOutcome::Accepted(text)),
        }
    }

    /// Draws a new assignment, on the server if possible.
    ///
    /// Any server failure falls back to a local draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the local draw fails too.
    pub fn reset(&self) -> ClientResult<ResetReport> {
        if let Some(transport) = &self.transport {
            let adopted = transport.reset().and_then(|response| {
                self.adopt(&response.assignments)?;
                Ok(response)
            });
            match adopted {
                Ok(response) => {
                    info!(repeated = response.repeated, "server drew a new assignment");
                    return Ok(ResetReport {
                        assignment: response.assignments,
                        repeated: response.repeated,
                        source: Source::Server,
                        message: response.message,
                    });
                }
                Err(e) => warn!(error = %e, "server reset failed, drawing locally"),
            }
        }

        let outcome = self.cache.reset()?;
        *self.current.write() = Some(outcome.assignment.clone());
        let message = if outcome.repeated {
            RESET_REPEATED_MESSAGE
        } else {
            RESET_MESSAGE
        };
        Ok(ResetReport {
            assignment: outcome.assignment,
            repeated: outcome.repeated,
            source: Source::Local,
            message: message.to_string(),
        })
    }

    /// Returns who `name` gives to. Never creates an assignment.
    ///
    /// In server-sync mode the server's assignment is authoritative; the
    /// local copy answers only when the server is empty or unreachable.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnknownParticipant`] if `name` is not on the roster
    /// - [`ClientError::NoAssignment`] if nothing is stored anywhere
    pub fn lookup(&self, name: &str) -> ClientResult<Pairing> {
        let giver = self
            .cache
            .roster()
            .find(name)
            .cloned()
            .ok_or_else(|| ClientError::UnknownParticipant(name.trim().to_string()))?;

        let assignment = self.resolve()?.ok_or(ClientError::NoAssignment)?;
        let receiver = assignment
            .target_of(&giver)
            .cloned()
            .ok_or(ClientError::NoAssignment)?;

        Ok(Pairing { giver, receiver })
    }

    /// Uploads the cached assignment to an empty server.
    ///
    /// # Errors
    ///
    /// - [`ClientError::ServerSyncDisabled`] in local-only mode
    /// - [`ClientError::NoLocalAssignment`] if the cache is empty
    /// - [`ClientError::ImportConflict`] if the server already holds one
    pub fn import_local(&self) -> ClientResult<Assignment> {
        let transport = self
            .transport
            .as_ref()
            .ok_or(ClientError::ServerSyncDisabled)?;
        let local = self.cache.get()?.ok_or(ClientError::NoLocalAssignment)?;

        let response = transport.import(&local)?;
        self.adopt(&response.assignments)?;
        info!("local assignment imported to server");
        Ok(response.assignments)
    }

    fn resolve(&self) -> ClientResult<Option<Assignment>> {
        if let ServerFetch::Found(assignment) = self.fetch_from_server() {
            return Ok(Some(assignment));
        }
        if let Some(current) = self.current() {
            return Ok(Some(current));
        }
        let cached = self.cache.get()?;
        if let Some(cached) = &cached {
            *self.current.write() = Some(cached.clone());
        }
        Ok(cached)
    }

    /// Installs a server assignment as current and writes it to the cache.
    fn adopt(&self, assignment: &Assignment) -> ClientResult<()> {
        assignment
            .validate(self.cache.roster())
            .map_err(|e| ClientError::Core(e.into()))?;

        if let Err(e) = self.cache.replace(assignment) {
            warn!(error = %e, "could not cache server assignment");
        }
        *self.current.write() = Some(assignment.clone());
        Ok(())
    }
}
