//! echodemo core: transport-agnostic contracts shared by the demo server.
//!
//! This crate defines the echo frame model, the user resource DTOs with their
//! validation rules, and the error surface. It carries no transport or runtime
//! dependencies so the contracts can be tested without a socket.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `EchoError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{EchoError, Result};
