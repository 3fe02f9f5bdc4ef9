//! Error types for santa core.

use crate::assignment::Assignment;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in santa core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A candidate assignment failed validation.
    #[error("invalid assignment: {0}")]
    Invalid(#[from] ValidationError),

    /// An assignment is already stored and may not be overwritten by import.
    #[error("an assignment is already stored")]
    Conflict {
        /// The assignment currently held by the store.
        existing: Assignment,
    },

    /// No fixed-point-free permutation was found.
    #[error("no derangement found after {attempts} attempts")]
    NoDerangement {
        /// Number of shuffles tried.
        attempts: u32,
    },

    /// The participant roster is unusable.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// Stored data could not be decoded.
    #[error("corrupted assignment data: {0}")]
    Corrupted(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Returns true if the error was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Invalid(_))
    }

    /// Returns true if the error is an import conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CoreError::Conflict { .. })
    }
}

/// Reasons a candidate assignment is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload is not a JSON object of strings.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Participants of the roster are absent from the keys.
    #[error("missing participants: {}", .0.join(", "))]
    MissingParticipants(Vec<String>),

    /// Keys name people outside the roster.
    #[error("unknown participants: {}", .0.join(", "))]
    UnknownParticipants(Vec<String>),

    /// The targets are not a permutation of the roster.
    #[error("targets are not a permutation of the participants")]
    NotAPermutation,

    /// Someone is assigned to themselves.
    #[error("{0} is assigned to themselves")]
    SelfAssignment(String),
}
