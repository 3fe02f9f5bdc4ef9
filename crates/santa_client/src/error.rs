//! Error types for the santa client.

use santa_core::{Assignment, CoreError};
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an error status.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error body.
        message: String,
    },

    /// The server refused an import because it already holds an assignment.
    #[error("server already holds an assignment")]
    ImportConflict {
        /// The server's assignment.
        existing: Assignment,
    },

    /// The server sent something that is not a valid protocol message.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// User input was rejected.
    #[error("{0}")]
    InvalidInput(String),

    /// Name is not on the roster.
    #[error("unknown participant: {0}")]
    UnknownParticipant(String),

    /// Import was requested but the local cache is empty.
    #[error("no local assignment; draw one locally first")]
    NoLocalAssignment,

    /// No assignment exists locally or on the server.
    #[error("no assignment stored; enter the reset keyword to draw one")]
    NoAssignment,

    /// A server operation was requested in local-only mode.
    #[error("server sync is disabled")]
    ServerSyncDisabled,

    /// Local store error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// Returns true if the request never reached the server.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Returns the HTTP status the server answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::ImportConflict { .. } => Some(409),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        assert!(ClientError::Transport("refused".into()).is_network());
        assert!(!ClientError::NoAssignment.is_network());

        let err = ClientError::Server {
            status: 400,
            message: "bad".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            ClientError::ImportConflict {
                existing: Assignment::default()
            }
            .status(),
            Some(409)
        );
        assert_eq!(ClientError::NoLocalAssignment.status(), None);
    }

    #[test]
    fn error_display() {
        let err = ClientError::Server {
            status: 500,
            message: "disk full".into(),
        };
        assert_eq!(err.to_string(), "server error (500): disk full");
    }
}
