//! Wire contracts.
//!
//! - `frame`: the data frames carried over the echo socket (text or binary).
//! - `user`: JSON bodies of the demo user resource and their field rules.
//!
//! Nothing here touches a socket or an HTTP request; the server maps transport
//! types onto these and back.

pub mod frame;
pub mod user;
