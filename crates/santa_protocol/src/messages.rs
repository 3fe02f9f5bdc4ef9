//! Request and response bodies.

use santa_core::Assignment;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reads the current assignment.
pub const ASSIGNMENTS_PATH: &str = "/api/assignments";
/// Discards the current assignment and draws a new one.
pub const RESET_PATH: &str = "/api/assignments/reset";
/// Uploads a client-drawn assignment to an empty server.
pub const IMPORT_PATH: &str = "/api/assignments/import";
/// Liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Message sent with a successful reset.
pub const RESET_MESSAGE: &str = "New draw created and saved.";
/// Message sent when the reset could only repeat the previous draw.
pub const RESET_REPEATED_MESSAGE: &str =
    "New draw created, but it is the same as the previous one.";
/// Message sent with a successful import.
pub const IMPORT_MESSAGE: &str = "Assignment imported and saved on the server.";

/// Result type for protocol encoding.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while encoding or decoding a message.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Body is not valid JSON for the expected message.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Body of `GET /api/assignments` when an assignment exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentsResponse {
    /// The stored assignment.
    pub assignments: Assignment,
    /// Always false: reads never draw.
    #[serde(default)]
    pub created: bool,
}

impl AssignmentsResponse {
    /// Wraps an existing assignment.
    pub fn new(assignments: Assignment) -> Self {
        Self {
            assignments,
            created: false,
        }
    }
}

/// Body of a successful reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    /// The new assignment.
    pub assignments: Assignment,
    /// Human-readable outcome.
    pub message: String,
    /// True if the draw repeated the previous assignment.
    #[serde(default)]
    pub repeated: bool,
}

impl ResetResponse {
    /// Builds a response, choosing the message from `repeated`.
    pub fn new(assignments: Assignment, repeated: bool) -> Self {
        let message = if repeated {
            RESET_REPEATED_MESSAGE
        } else {
            RESET_MESSAGE
        };
        Self {
            assignments,
            message: message.to_string(),
            repeated,
        }
    }
}

/// Body of `POST /api/assignments/import`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// The assignment to upload.
    pub assignments: Assignment,
}

/// Body of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    /// The assignment now held by the server.
    pub assignments: Assignment,
    /// Human-readable outcome.
    pub message: String,
}

impl ImportResponse {
    /// Builds the standard import response.
    pub fn new(assignments: Assignment) -> Self {
        Self {
            assignments,
            message: IMPORT_MESSAGE.to_string(),
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub error: String,
    /// The assignment the server already holds (conflicts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignments: Option<Assignment>,
}

impl ErrorResponse {
    /// Creates an error body without an assignment.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            assignments: None,
        }
    }

    /// Creates a conflict body carrying the existing assignment.
    pub fn conflict(error: impl Into<String>, existing: Assignment) -> Self {
        Self {
            error: error.into(),
            assignments: Some(existing),
        }
    }
}

/// Encodes a message as JSON bytes.
pub fn encode<T: Serialize>(message: &T) -> ProtocolResult<Vec<u8>> {
    Ok(serde_json::to_vec(message)?)
}

/// Decodes a message from JSON bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> ProtocolResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use santa_core::Participant;
    use serde_json::json;

    fn cycle() -> Assignment {
        [("ibo", "adnan"), ("adnan", "ahmet"), ("ahmet", "ibo")]
            .iter()
            .map(|(g, r)| (Participant::new(*g), Participant::new(*r)))
            .collect()
    }

    #[test]
    fn assignments_response_shape() {
        let value = serde_json::to_value(AssignmentsResponse::new(cycle())).unwrap();
        assert_eq!(
            value,
            json!({
                "assignments": {"ibo": "adnan", "adnan": "ahmet", "ahmet": "ibo"},
                "created": false
            })
        );
    }

    #[test]
    fn reset_message_follows_repeat_flag() {
        assert_eq!(ResetResponse::new(cycle(), false).message, RESET_MESSAGE);
        assert_eq!(
            ResetResponse::new(cycle(), true).message,
            RESET_REPEATED_MESSAGE
        );
    }

    #[test]
    fn reset_response_tolerates_missing_flag() {
        let body = br#"{"assignments": {"ibo": "adnan"}, "message": "ok"}"#;
        let response: ResetResponse = decode(body).unwrap();
        assert!(!response.repeated);
        assert_eq!(response.message, "ok");
    }

    #[test]
    fn error_response_omits_absent_assignment() {
        let value = serde_json::to_value(ErrorResponse::new("bad")).unwrap();
        assert_eq!(value, json!({"error": "bad"}));

        let value = serde_json::to_value(ErrorResponse::conflict("taken", cycle())).unwrap();
        assert_eq!(value["assignments"]["ahmet"], "ibo");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode::<ImportResponse>(b"not json").is_err());
    }
}
