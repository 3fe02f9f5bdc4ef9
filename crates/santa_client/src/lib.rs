//! # Santa Client
//!
//! Local-first Secret-Santa client with optional server sync.
//!
//! This crate provides:
//! - [`CacheBackend`]: a JSON key/value cache file holding the assignment
//! - Input validation and classification ([`validate_input`], [`classify`])
//! - [`AssignmentTransport`]: the seam between client and server, with an
//!   HTTP implementation ([`HttpTransport`]) and a [`MockTransport`]
//! - [`DrawClient`]: reset, lookup, startup sync and import, in either
//!   [`SyncMode::ServerSync`] or [`SyncMode::LocalOnly`]
//!
//! # Sync Model
//!
//! The server is authoritative when reachable. Every server answer is
//! written through to the local cache, and any server failure falls back to
//! the cache. A draw made locally while the server was down can later be
//! uploaded with [`DrawClient::import_local`], which only succeeds if the
//! server is still empty.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod cache;
mod client;
mod config;
mod error;
mod http;
mod input;
mod transport;

pub use cache::{CacheBackend, CACHE_KEY};
pub use client::{CheckOutcome, DrawClient, Pairing, ResetReport, ServerFetch, Source, Startup};
pub use config::{ClientConfig, SyncMode, DEFAULT_CACHE_FILE, DEFAULT_SERVER_URL};
pub use error::{ClientError, ClientResult};
pub use http::{
    HttpClient, HttpRequest, HttpResponse, HttpTransport, LoopbackClient, LoopbackServer,
    UreqClient,
};
pub use input::{classify, validate_input, InputError, Intent, MIN_INPUT_CHARS, RESET_KEYWORD};
pub use transport::{AssignmentTransport, MockTransport};
