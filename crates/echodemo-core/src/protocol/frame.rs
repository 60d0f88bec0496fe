//! Echo data frames.
//!
//! A frame is a kind tag plus the raw payload. The echo path never inspects or
//! rewrites the payload; it only needs to hand the same kind and bytes back.

use bytes::Bytes;

/// Data frame kind. Control frames (ping/pong/close) are not modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Binary,
}

impl MessageKind {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Binary => "binary",
        }
    }
}

/// One data frame as received from (or sent to) a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoFrame {
    pub kind: MessageKind,
    /// Opaque payload (zero-copy).
    pub payload: Bytes,
}

impl EchoFrame {
    /// Text frame. The payload must be UTF-8; the codec checks again on send.
    pub fn text(s: impl Into<Bytes>) -> Self {
        Self {
            kind: MessageKind::Text,
            payload: s.into(),
        }
    }

    pub fn binary(b: impl Into<Bytes>) -> Self {
        Self {
            kind: MessageKind::Binary,
            payload: b.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
