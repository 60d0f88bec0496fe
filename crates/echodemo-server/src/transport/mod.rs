//! Transport layer (WebSocket).
//!
//! Exposes the upgrade handler, the origin policy consulted before upgrading,
//! the message codec, and the per-connection echo session.

pub mod codec;
pub mod origin;
pub mod session;
pub mod upgrade;
