//! Mapping between axum WebSocket messages and echo frames.
//!
//! - Text/Binary => `EchoFrame` (payload moved, not copied)
//! - Ping/Pong   => control, answered by the transport itself
//! - Close       => close code surfaced for lifecycle handling

use axum::extract::ws::{Message, Utf8Bytes};
use bytes::Bytes;
use echodemo_core::{
    error::{EchoError, Result},
    protocol::frame::{EchoFrame, MessageKind},
};

#[derive(Debug)]
pub enum Inbound {
    Data(EchoFrame),
    Control,
    Close(Option<u16>),
}

pub fn decode(msg: Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Data(EchoFrame::text(Bytes::from(s))),
        Message::Binary(b) => Inbound::Data(EchoFrame::binary(b)),
        Message::Ping(_) | Message::Pong(_) => Inbound::Control,
        Message::Close(frame) => Inbound::Close(frame.map(|f| f.code)),
    }
}

/// Fails only for a text frame whose payload is not UTF-8.
pub fn encode(frame: EchoFrame) -> Result<Message> {
    match frame.kind {
        MessageKind::Text => Utf8Bytes::try_from(frame.payload)
            .map(Message::Text)
            .map_err(|e| EchoError::Internal(format!("text frame is not utf-8: {e}"))),
        MessageKind::Binary => Ok(Message::Binary(frame.payload)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::extract::ws::CloseFrame;

    #[test]
    fn data_frames_keep_their_kind() {
        let Inbound::Data(f) = decode(Message::Text("hi".into())) else {
            panic!("expected data");
        };
        assert_eq!(encode(f).unwrap(), Message::Text("hi".into()));

        let Inbound::Data(f) = decode(Message::Binary(vec![1, 2, 3].into())) else {
            panic!("expected data");
        };
        assert_eq!(encode(f).unwrap(), Message::Binary(vec![1, 2, 3].into()));
    }

    #[test]
    fn text_frame_with_bad_utf8_does_not_encode() {
        let f = EchoFrame::text(Bytes::from_static(&[0xc3, 0x28]));
        let err = encode(f).unwrap_err();
        assert_eq!(err.client_code().as_str(), "INTERNAL");
    }

    #[test]
    fn control_and_close() {
        assert!(matches!(decode(Message::Ping(vec![9].into())), Inbound::Control));
        assert!(matches!(decode(Message::Pong(Bytes::new())), Inbound::Control));
        assert!(matches!(decode(Message::Close(None)), Inbound::Close(None)));
        let close = Message::Close(Some(CloseFrame {
            code: 1001,
            reason: "bye".into(),
        }));
        assert!(matches!(decode(close), Inbound::Close(Some(1001))));
    }
}
