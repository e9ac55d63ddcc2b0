//! Classification of inbound WebSocket frames.

use axum::extract::ws::Message;

/// What the echo loop does with one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAction {
    /// Send this frame back unchanged.
    Echo(Message),
    /// The peer started the closing handshake.
    Close,
    /// Control frame handled by the WebSocket layer; nothing to send.
    Ignore,
}

impl FrameAction {
    /// Decides how to answer `message`.
    ///
    /// Text and binary frames are echoed as-is, so payload and frame type
    /// are preserved. Pings are answered with a pong by the WebSocket layer
    /// itself and pongs carry no data, so both are ignored here.
    #[must_use]
    pub fn for_message(message: Message) -> Self {
        match message {
            Message::Text(_) | Message::Binary(_) => Self::Echo(message),
            Message::Close(_) => Self::Close,
            Message::Ping(_) | Message::Pong(_) => Self::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_echoed_unchanged() {
        let action = FrameAction::for_message(Message::text("hello"));
        assert_eq!(action, FrameAction::Echo(Message::text("hello")));
    }

    #[test]
    fn binary_keeps_frame_type_and_bytes() {
        let action = FrameAction::for_message(Message::binary(vec![0x00_u8, 0xFF, 0x10]));
        assert_eq!(
            action,
            FrameAction::Echo(Message::binary(vec![0x00_u8, 0xFF, 0x10]))
        );
    }

    #[test]
    fn empty_text_is_still_echoed() {
        let action = FrameAction::for_message(Message::text(""));
        assert_eq!(action, FrameAction::Echo(Message::text("")));
    }

    #[test]
    fn close_ends_the_loop() {
        assert_eq!(
            FrameAction::for_message(Message::Close(None)),
            FrameAction::Close
        );
    }

    #[test]
    fn control_frames_are_not_echoed() {
        assert_eq!(
            FrameAction::for_message(Message::Ping(vec![9_u8].into())),
            FrameAction::Ignore
        );
        assert_eq!(
            FrameAction::for_message(Message::Pong(vec![9_u8].into())),
            FrameAction::Ignore
        );
    }
}
