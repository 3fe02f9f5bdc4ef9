//! # Santa Core
//!
//! Derangement draws and assignment storage.
//!
//! This crate provides:
//! - [`Roster`] and [`Participant`]: who takes part in a draw
//! - [`Assignment`]: the giver → receiver mapping and its validation
//! - [`generate`]: a rejection-sampling derangement generator
//! - [`AssignmentStore`]: get/reset/import policy over a pluggable
//!   [`AssignmentBackend`]
//!
//! ## Key Invariants
//!
//! - An assignment leaving a store is a derangement over exactly the roster
//! - `get` never draws
//! - `import` never overwrites
//! - `reset` always replaces, and differs from the previous draw when the
//!   roster admits more than one derangement
//!
//! ## Example
//!
//! ```rust
//! use santa_core::{AssignmentStore, DrawConfig, MemoryBackend};
//!
//! let store = AssignmentStore::new(MemoryBackend::new(), DrawConfig::default());
//! assert!(store.get().unwrap().is_none());
//!
//! let outcome = store.reset().unwrap();
//! assert_eq!(store.get().unwrap(), Some(outcome.assignment));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod assignment;
mod config;
mod derangement;
mod error;
mod participant;
mod store;

pub use assignment::Assignment;
pub use config::{DrawConfig, DEFAULT_MAX_ATTEMPTS};
pub use derangement::{generate, Draw};
pub use error::{CoreError, CoreResult, ValidationError};
pub use participant::{Participant, Roster, DEFAULT_PARTICIPANTS};
pub use store::{
    write_atomic, AssignmentBackend, AssignmentStore, FileBackend, MemoryBackend, ResetOutcome,
};
