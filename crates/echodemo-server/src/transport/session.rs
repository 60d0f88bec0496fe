//! Echo session: one upgraded connection and its read-echo loop.
//!
//! States: `Open` -> `Closing` -> `Closed`. While `Open` the session awaits the
//! next message and writes the same kind and payload straight back; one read
//! and at most one write are in flight at any time, so echoes leave in receipt
//! order. Any read or write failure ends the session. Nothing is retried.
//!
//! `run` consumes the session, so the write half is closed exactly once on
//! every exit path.

use std::fmt;
use std::io;
use std::sync::Arc;

use futures_util::{Sink, SinkExt, Stream, StreamExt};

use axum::extract::ws::Message;
use tokio_tungstenite::tungstenite::{self, error::ProtocolError};

use crate::obs::ServerMetrics;
use crate::transport::codec::{decode, encode, Inbound};

pub const CLOSE_NORMAL: u16 = 1000;
pub const CLOSE_GOING_AWAY: u16 = 1001;
pub const CLOSE_ABNORMAL: u16 = 1006;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closing,
    Closed,
}

/// Why a session left `Open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// Peer sent a close frame.
    PeerClosed { code: Option<u16> },
    /// Stream ended without a close handshake (abnormal closure, 1006).
    StreamEnded,
    /// Transport reported a connection reset/abort.
    Reset(String),
    ReadFailed(String),
    WriteFailed(String),
}

impl CloseReason {
    /// Normal, going-away and abnormal closures are routine; anything else is logged.
    pub fn is_expected(&self) -> bool {
        match self {
            CloseReason::PeerClosed { code: None } => true,
            CloseReason::PeerClosed { code: Some(c) } => {
                matches!(*c, CLOSE_NORMAL | CLOSE_GOING_AWAY | CLOSE_ABNORMAL)
            }
            CloseReason::StreamEnded | CloseReason::Reset(_) => true,
            CloseReason::ReadFailed(_) | CloseReason::WriteFailed(_) => false,
        }
    }

    /// Metrics label.
    pub fn as_label(&self) -> &'static str {
        match self {
            CloseReason::PeerClosed { .. } => "peer_closed",
            CloseReason::StreamEnded => "stream_ended",
            CloseReason::Reset(_) => "reset",
            CloseReason::ReadFailed(_) => "read_failed",
            CloseReason::WriteFailed(_) => "write_failed",
        }
    }

    /// Walk the source chain: a missing close handshake is an abnormal
    /// closure, an io reset means the peer vanished, anything else is a failure.
    fn from_read_error<E>(e: &E) -> Self
    where
        E: std::error::Error + 'static,
    {
        let mut cur: Option<&(dyn std::error::Error + 'static)> = Some(e);
        while let Some(err) = cur {
            if let Some(ws) = err.downcast_ref::<tungstenite::Error>() {
                if matches!(
                    ws,
                    tungstenite::Error::ConnectionClosed
                        | tungstenite::Error::AlreadyClosed
                        | tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake)
                ) {
                    return CloseReason::StreamEnded;
                }
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if is_connection_reset(io.kind()) {
                    return CloseReason::Reset(e.to_string());
                }
            }
            cur = err.source();
        }
        CloseReason::ReadFailed(e.to_string())
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::PeerClosed { code: Some(c) } => write!(f, "peer closed (code {c})"),
            CloseReason::PeerClosed { code: None } => f.write_str("peer closed"),
            CloseReason::StreamEnded => f.write_str("stream ended without close frame"),
            CloseReason::Reset(e) => write!(f, "connection reset: {e}"),
            CloseReason::ReadFailed(e) => write!(f, "read failed: {e}"),
            CloseReason::WriteFailed(e) => write!(f, "write failed: {e}"),
        }
    }
}

fn is_connection_reset(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub echoed: u64,
    pub reason: CloseReason,
}

/// Generic over the two halves so the loop runs on a split axum `WebSocket`
/// in production and on in-memory streams in tests.
pub struct Session<R, W> {
    id: u64,
    rx: R,
    tx: W,
    state: SessionState,
    echoed: u64,
    metrics: Arc<ServerMetrics>,
}

impl<R, W, E> Session<R, W>
where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: std::error::Error + 'static,
    W: Sink<Message> + Unpin,
    W::Error: fmt::Display,
{
    pub fn new(id: u64, rx: R, tx: W, metrics: Arc<ServerMetrics>) -> Self {
        Self {
            id,
            rx,
            tx,
            state: SessionState::Open,
            echoed: 0,
            metrics,
        }
    }

    pub async fn run(mut self) -> SessionSummary {
        let reason = self.echo_until_closed().await;

        if reason.is_expected() {
            tracing::debug!(%reason, "peer closed");
        } else {
            tracing::warn!(%reason, "websocket error");
        }

        self.transition(SessionState::Closing);
        if let Err(e) = self.tx.close().await {
            // Usually the peer is already gone.
            tracing::debug!(error = %e, "close after session end failed");
        }
        self.transition(SessionState::Closed);

        SessionSummary {
            echoed: self.echoed,
            reason,
        }
    }

    async fn echo_until_closed(&mut self) -> CloseReason {
        loop {
            let msg = match self.rx.next().await {
                None => return CloseReason::StreamEnded,
                Some(Err(e)) => return CloseReason::from_read_error(&e),
                Some(Ok(m)) => m,
            };

            let frame = match decode(msg) {
                Inbound::Data(f) => f,
                Inbound::Control => continue,
                Inbound::Close(code) => return CloseReason::PeerClosed { code },
            };

            let (kind, len) = (frame.kind, frame.len());
            tracing::debug!(kind = kind.as_str(), len, "received message");

            // Nothing reached the wire: the inbound frame itself was unusable.
            let out = match encode(frame) {
                Ok(m) => m,
                Err(e) => return CloseReason::ReadFailed(e.to_string()),
            };
            if let Err(e) = self.tx.send(out).await {
                return CloseReason::WriteFailed(e.to_string());
            }

            self.echoed += 1;
            self.metrics.record_echo(kind, len);
        }
    }

    fn transition(&mut self, to: SessionState) {
        tracing::debug!(session = self.id, from = ?self.state, to = ?to, "session state");
        self.state = to;
    }
}
