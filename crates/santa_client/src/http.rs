//! HTTP transport implementation.
//!
//! The actual HTTP client is abstracted via [`HttpClient`] so the transport
//! can run over [`UreqClient`] in production and over an in-process
//! [`LoopbackClient`] in tests.

use crate::error::{ClientError, ClientResult};
use crate::transport::AssignmentTransport;
use parking_lot::RwLock;
use santa_core::Assignment;
use santa_protocol::{
    decode, encode, AssignmentsResponse, ErrorResponse, ImportRequest, ImportResponse,
    ResetResponse, ASSIGNMENTS_PATH, IMPORT_PATH, RESET_PATH,
};
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: &'static str,
    /// Absolute URL.
    pub url: String,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body.
    pub body: Vec<u8>,
}

/// HTTP client abstraction.
///
/// `Err` means the request never produced a response (connection refused,
/// DNS failure, timeout). Error statuses are `Ok` responses.
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the response.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

/// HTTP-based assignment transport using JSON bodies.
pub struct HttpTransport<C: HttpClient> {
    /// Base URL of the server (e.g., "http://localhost:3000").
    base_url: String,
    /// HTTP client implementation.
    client: C,
    /// Last transport error message.
    last_error: RwLock<Option<String>>,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            last_error: RwLock::new(None),
        }
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the last transport error message.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }

    fn send(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<HttpResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method, %url, "sending request");

        match self.client.send(HttpRequest { method, url, body }) {
            Ok(response) => {
                *self.last_error.write() = None;
                debug!(status = response.status, "received response");
                Ok(response)
            }
            Err(e) => {
                *self.last_error.write() = Some(e.clone());
                Err(ClientError::Transport(e))
            }
        }
    }
}

fn decode_body<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> ClientResult<T> {
    decode(&response.body).map_err(|e| ClientError::Protocol(e.to_string()))
}

fn error_from(response: &HttpResponse) -> ClientError {
    match decode::<ErrorResponse>(&response.body) {
        Ok(ErrorResponse {
            assignments: Some(existing),
            ..
        }) if response.status == 409 => ClientError::ImportConflict { existing },
        Ok(body) => ClientError::Server {
            status: response.status,
            message: body.error,
        },
        Err(_) => ClientError::Server {
            status: response.status,
            message: format!("HTTP {}", response.status),
        },
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

impl<C: HttpClient> AssignmentTransport for HttpTransport<C> {
    fn fetch(&self) -> ClientResult<Option<Assignment>> {
        let response = self.send("GET", ASSIGNMENTS_PATH, None)?;
        match response.status {
            204 => Ok(None),
            status if is_success(status) => {
                let body: AssignmentsResponse = decode_body(&response)?;
                Ok(Some(body.assignments))
            }
            _ => Err(error_from(&response)),
        }
    }

    fn reset(&self) -> ClientResult<ResetResponse> {
        let response = self.send("POST", RESET_PATH, None)?;
        if is_success(response.status) {
            decode_body(&response)
        } else {
            Err(error_from(&response))
        }
    }

    fn import(&self, assignment: &Assignment) -> ClientResult<ImportResponse> {
        let request = ImportRequest {
            assignments: assignment.clone(),
        };
        let body = encode(&request).map_err(|e| ClientError::Protocol(e.to_string()))?;

        let response = self.send("POST", IMPORT_PATH, Some(body))?;
        if is_success(response.status) {
            decode_body(&response)
        } else {
            Err(error_from(&response))
        }
    }
}

/// Blocking HTTP client backed by `ureq`.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    /// Creates a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl HttpClient for UreqClient {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let call = self.agent.request(request.method, &request.url);
        let result = match request.body {
            Some(body) => call
                .set("Content-Type", "application/json")
                .send_bytes(&body),
            None => call.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(e.to_string()),
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| e.to_string())?;
        Ok(HttpResponse { status, body })
    }
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer {
    /// Handles a request for `path` and returns the response.
    fn handle(&self, method: &str, path: &str, body: &[u8]) -> Result<HttpResponse, String>;
}

/// A loopback HTTP client that routes requests directly to a server.
///
/// Useful for testing without actual network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer + Send + Sync> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }

    /// Returns the server.
    pub fn server(&self) -> &S {
        &self.server
    }
}

impl<S: LoopbackServer + Send + Sync> HttpClient for LoopbackClient<S> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        // Extract path from URL
        let path = request
            .url
            .find("/api/")
            .map(|i| &request.url[i..])
            .unwrap_or(&request.url);

        self.server
            .handle(request.method, path, request.body.as_deref().unwrap_or_default())
    }
}
