//! Shared error type across echodemo crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed request body or parameters.
    BadRequest,
    /// Request body parsed but failed a field rule.
    Validation,
    /// WebSocket upgrade refused by the origin policy.
    OriginRejected,
    /// Invalid configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Validation => "VALIDATION",
            ClientCode::OriginRejected => "ORIGIN_REJECTED",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, EchoError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum EchoError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(String),
    #[error("origin not allowed")]
    OriginRejected,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl EchoError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            EchoError::BadRequest(_) => ClientCode::BadRequest,
            EchoError::Validation(_) => ClientCode::Validation,
            EchoError::OriginRejected => ClientCode::OriginRejected,
            EchoError::Config(_) => ClientCode::Config,
            EchoError::Internal(_) => ClientCode::Internal,
        }
    }
}
