//! # Santa Server
//!
//! HTTP server holding the authoritative Secret-Santa assignment.
//!
//! This crate provides:
//! - HTTP endpoints (read, reset, import) on top of axum
//! - Framework-agnostic request handlers returning [`ApiReply`]
//! - Error → status mapping (400 validation, 409 conflict, 500 storage)
//!
//! # Architecture
//!
//! A single [`santa_core::AssignmentStore`] backed by a JSON file is created
//! at startup and injected into every handler through the router state.
//! Reads never draw; only `reset` creates assignments, and `import` only
//! fills an empty server.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod api;
mod config;
mod error;
mod handler;
mod server;

pub use config::{ServerConfig, DEFAULT_DATA_FILE};
pub use error::{ServerError, ServerResult};
pub use handler::{ApiReply, RequestHandler, SharedStore};
pub use server::AssignmentServer;
