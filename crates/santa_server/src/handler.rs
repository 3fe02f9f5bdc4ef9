//! Request handlers for the assignment endpoints.
//!
//! Handlers are framework-agnostic: they take raw bodies and produce an
//! [`ApiReply`] (status + optional JSON). The axum router in [`crate::api`]
//! and the loopback client used in tests both sit on top of these.

use crate::error::{ServerError, ServerResult};
use santa_core::{Assignment, AssignmentBackend, AssignmentStore};
use santa_protocol::{
    AssignmentsResponse, ErrorResponse, ImportResponse, ResetResponse, ASSIGNMENTS_PATH,
    IMPORT_PATH, RESET_PATH,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Store type shared by all handlers.
pub type SharedStore = Arc<AssignmentStore<Box<dyn AssignmentBackend>>>;

/// A response independent of any HTTP framework.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    /// HTTP status code.
    pub status: u16,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl ApiReply {
    /// A reply with a JSON body.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        Self {
            status,
            body: serde_json::to_value(body).ok(),
        }
    }

    /// A reply with no body.
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Serialises the body, or returns an empty vector for bodiless replies.
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::to_vec(body).ok())
            .unwrap_or_default()
    }
}

impl From<ServerError> for ApiReply {
    fn from(err: ServerError) -> Self {
        let status = err.status_code();
        if err.is_server_error() {
            error!(error = %err, "request failed");
        } else {
            warn!(error = %err, status, "request rejected");
        }

        let body = match err {
            ServerError::Conflict { existing } => {
                ErrorResponse::conflict("server already holds an assignment", existing)
            }
            other => ErrorResponse::new(other.to_string()),
        };
        ApiReply::json(status, &body)
    }
}

/// Handler for assignment requests.
pub struct RequestHandler {
    store: SharedStore,
}

impl RequestHandler {
    /// Creates a handler over a shared store.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Returns the store the handler serves.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// `GET /api/assignments`: 200 with the assignment, 204 when empty.
    pub fn get_assignments(&self) -> ApiReply {
        match self.store.get() {
            Ok(Some(assignment)) => {
                debug!(participants = assignment.len(), "returning existing assignment");
                ApiReply::json(200, &AssignmentsResponse::new(assignment))
            }
            Ok(None) => {
                debug!("no assignment stored; not creating one on read");
                ApiReply::empty(204)
            }
            Err(e) => ServerError::from(e).into(),
        }
    }

    /// `POST /api/assignments/reset`: always draws and stores a new assignment.
    pub fn reset(&self) -> ApiReply {
        match self.store.reset() {
            Ok(outcome) => {
                info!(repeated = outcome.repeated, "assignment reset");
                ApiReply::json(200, &ResetResponse::new(outcome.assignment, outcome.repeated))
            }
            Err(e) => ServerError::from(e).into(),
        }
    }

    /// `POST /api/assignments/import`: stores a client assignment if none exists.
    pub fn import(&self, body: &[u8]) -> ApiReply {
        match self.try_import(body) {
            Ok(assignment) => {
                info!("assignment imported from client");
                ApiReply::json(201, &ImportResponse::new(assignment))
            }
            Err(e) => e.into(),
        }
    }

    fn try_import(&self, body: &[u8]) -> ServerResult<Assignment> {
        let payload: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;

        let candidate = payload
            .get("assignments")
            .ok_or_else(|| ServerError::InvalidRequest("missing assignments".into()))?;

        let candidate = Assignment::from_json(candidate)?;
        Ok(self.store.import(candidate)?)
    }

    /// Dispatches a request by method and path.
    pub fn route(&self, method: &str, path: &str, body: &[u8]) -> ApiReply {
        match (method, path) {
            ("GET", ASSIGNMENTS_PATH) => self.get_assignments(),
            ("POST", RESET_PATH) => self.reset(),
            ("POST", IMPORT_PATH) => self.import(body),
            _ => ServerError::NotFound(format!("{method} {path}")).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use santa_core::{DrawConfig, MemoryBackend, Participant};
    use serde_json::json;

    fn handler() -> RequestHandler {
        let backend: Box<dyn AssignmentBackend> = Box::new(MemoryBackend::new());
        RequestHandler::new(Arc::new(AssignmentStore::new(
            backend,
            DrawConfig::default(),
        )))
    }

    fn import_body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&json!({ "assignments": value })).unwrap()
    }

    #[test]
    fn empty_store_returns_no_content() {
        let handler = handler();
        let reply = handler.get_assignments();
        assert_eq!(reply.status, 204);
        assert!(reply.body.is_none());
        assert!(reply.body_bytes().is_empty());
    }

    #[test]
    fn reset_then_get() {
        let handler = handler();

        let reply = handler.reset();
        assert_eq!(reply.status, 200);
        let body = reply.body.unwrap();
        assert_eq!(body["message"], "New draw created and saved.");
        assert_eq!(body["assignments"].as_object().unwrap().len(), 3);

        let reply = handler.get_assignments();
        assert_eq!(reply.status, 200);
        let fetched = reply.body.unwrap();
        assert_eq!(fetched["assignments"], body["assignments"]);
        assert_eq!(fetched["created"], false);
    }

    #[test]
    fn import_accepts_valid_candidate() {
        let handler = handler();
        let reply = handler.import(&import_body(
            json!({"ibo": "ahmet", "adnan": "ibo", "ahmet": "adnan"}),
        ));
        assert_eq!(reply.status, 201);

        let stored = handler.store().get().unwrap().unwrap();
        assert_eq!(
            stored.target_of(&Participant::new("ibo")).map(Participant::as_str),
            Some("ahmet")
        );
    }

    #[test]
    fn import_rejects_bad_payloads() {
        let handler = handler();

        for body in [
            b"not json".to_vec(),
            b"{}".to_vec(),
            import_body(json!(null)),
            import_body(json!({"ibo": "adnan", "adnan": "ibo"})),
            import_body(json!({"ibo": "adnan", "adnan": "ahmet", "ahmet": "ibo", "x": "ibo"})),
            import_body(json!({"ibo": "adnan", "adnan": "adnan", "ahmet": "ibo"})),
            import_body(json!({"ibo": "ibo", "adnan": "ahmet", "ahmet": "adnan"})),
        ] {
            let reply = handler.import(&body);
            assert_eq!(reply.status, 400, "body: {}", String::from_utf8_lossy(&body));
            assert!(reply.body.unwrap()["error"].is_string());
        }

        assert!(handler.store().get().unwrap().is_none());
    }

    #[test]
    fn import_conflicts_once_assigned() {
        let handler = handler();
        let current = handler.reset().body.unwrap()["assignments"].clone();

        let reply = handler.import(&import_body(
            json!({"ibo": "ahmet", "adnan": "ibo", "ahmet": "adnan"}),
        ));
        assert_eq!(reply.status, 409);
        assert_eq!(reply.body.unwrap()["assignments"], current);
    }

    #[test]
    fn route_dispatches() {
        let handler = handler();
        assert_eq!(handler.route("GET", "/api/assignments", b"").status, 204);
        assert_eq!(handler.route("POST", "/api/assignments/reset", b"").status, 200);
        assert_eq!(handler.route("GET", "/api/assignments", b"").status, 200);
        assert_eq!(handler.route("DELETE", "/api/assignments", b"").status, 404);
    }
}
