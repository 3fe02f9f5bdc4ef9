//! Error types for the assignment server.

use santa_core::{Assignment, CoreError, ValidationError};
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while serving a request.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Request body could not be understood.
    #[error("invalid payload: {0}")]
    InvalidRequest(String),

    /// Candidate assignment was rejected.
    #[error("invalid assignment: {0}")]
    Validation(#[from] ValidationError),

    /// The server already holds an assignment.
    #[error("server already holds an assignment")]
    Conflict {
        /// The stored assignment.
        existing: Assignment,
    },

    /// No route matches the request.
    #[error("no route for {0}")]
    NotFound(String),

    /// A new assignment could not be drawn.
    #[error("could not create a new assignment: {0}")]
    Draw(String),

    /// Storage failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker running the request died.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Invalid(reason) => ServerError::Validation(reason),
            CoreError::Conflict { existing } => ServerError::Conflict { existing },
            CoreError::NoDerangement { .. } => ServerError::Draw(err.to_string()),
            CoreError::Io(e) => ServerError::Io(e),
            CoreError::InvalidRoster(_) | CoreError::Corrupted(_) => {
                ServerError::Storage(err.to_string())
            }
        }
    }
}

impl ServerError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidRequest(_) | ServerError::Validation(_) => 400,
            ServerError::NotFound(_) => 404,
            ServerError::Conflict { .. } => 409,
            ServerError::Draw(_)
            | ServerError::Storage(_)
            | ServerError::Io(_)
            | ServerError::Internal(_) => 500,
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        assert!(ServerError::InvalidRequest("bad".into()).is_client_error());
        assert!(ServerError::Storage("disk".into()).is_server_error());
        assert!(ServerError::Internal("panicked".into()).is_server_error());
        assert!(!ServerError::InvalidRequest("bad".into()).is_server_error());
    }

    #[test]
    fn core_errors_map_to_statuses() {
        let validation: ServerError = CoreError::from(ValidationError::NotAPermutation).into();
        assert_eq!(validation.status_code(), 400);

        let conflict: ServerError = CoreError::Conflict {
            existing: Assignment::default(),
        }
        .into();
        assert_eq!(conflict.status_code(), 409);

        let draw: ServerError = CoreError::NoDerangement { attempts: 3 }.into();
        assert_eq!(draw.status_code(), 500);

        let io: ServerError = CoreError::Io(std::io::Error::other("disk full")).into();
        assert_eq!(io.status_code(), 500);
    }

    #[test]
    fn error_display() {
        let err = ServerError::Validation(ValidationError::SelfAssignment("ibo".into()));
        assert_eq!(err.to_string(), "invalid assignment: ibo is assigned to themselves");
    }
}
