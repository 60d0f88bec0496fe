//! echodemo server library entry.
//!
//! Wires config, application state, the HTTP handlers and the WebSocket echo
//! transport into an axum router. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
