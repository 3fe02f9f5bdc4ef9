//! # Santa Protocol
//!
//! JSON wire messages shared by the assignment server and its clients.
//!
//! | Route                          | Success                      | Failure             |
//! |--------------------------------|------------------------------|---------------------|
//! | `GET  /api/assignments`        | 200 [`AssignmentsResponse`], 204 when empty | 500 |
//! | `POST /api/assignments/reset`  | 200 [`ResetResponse`]        | 500                 |
//! | `POST /api/assignments/import` | 201 [`ImportResponse`]       | 400, 409, 500       |
//!
//! Every failure body is an [`ErrorResponse`].
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod messages;

pub use messages::{
    decode, encode, AssignmentsResponse, ErrorResponse, ImportRequest, ImportResponse,
    ProtocolError, ProtocolResult, ResetResponse, ASSIGNMENTS_PATH, HEALTH_PATH, IMPORT_MESSAGE,
    IMPORT_PATH, RESET_MESSAGE, RESET_PATH, RESET_REPEATED_MESSAGE,
};
