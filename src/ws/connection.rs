//! Per-connection echo loop.
//!
//! Every accepted WebSocket runs [`run_connection`] in its own task. The
//! loop reads one frame at a time and writes the echo before reading the
//! next, so replies leave in exactly the order requests arrived.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};

use super::frame::FrameAction;
use crate::domain::{ConnectionId, EchoSummary};
use crate::error::EchoError;

/// Runs the echo loop for a single upgraded connection.
///
/// Never returns an error: transport failures are logged and end only this
/// connection.
pub async fn run_connection(mut socket: WebSocket, peer: SocketAddr) {
    let conn_id = ConnectionId::new();
    tracing::info!(%conn_id, %peer, "ws connection opened");

    match echo_loop(&mut socket).await {
        Ok(summary) => tracing::info!(
            %conn_id,
            %peer,
            frames = summary.frames(),
            text_frames = summary.text_frames,
            binary_frames = summary.binary_frames,
            bytes = summary.bytes,
            "ws connection closed"
        ),
        Err(err) => tracing::warn!(%conn_id, %peer, error = %err, "ws connection dropped"),
    }
}

/// Echoes every data frame on `socket` until the peer closes or the
/// transport fails, then closes the socket.
///
/// The socket is closed on every exit path, including errors.
///
/// # Errors
///
/// Returns [`EchoError::Transport`] if reading or writing a frame fails.
pub async fn echo_loop<S>(socket: &mut S) -> Result<EchoSummary, EchoError>
where
    S: Stream<Item = Result<Message, axum::Error>> + Sink<Message, Error = axum::Error> + Unpin,
{
    let mut summary = EchoSummary::default();
    let outcome = pump(socket, &mut summary).await;

    // Fails harmlessly when the peer already completed the close handshake.
    if let Err(err) = socket.close().await {
        tracing::trace!(error = %err, "ws close after loop exit");
    }

    outcome.map(|()| summary)
}

async fn pump<S>(socket: &mut S, summary: &mut EchoSummary) -> Result<(), EchoError>
where
    S: Stream<Item = Result<Message, axum::Error>> + Sink<Message, Error = axum::Error> + Unpin,
{
    while let Some(frame) = socket.next().await {
        match FrameAction::for_message(frame?) {
            FrameAction::Echo(message) => {
                socket.send(message.clone()).await?;
                summary.record(&message);
            }
            FrameAction::Close => break,
            FrameAction::Ignore => {}
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::VecDeque;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use super::*;

    /// In-memory socket replaying a fixed inbound script.
    #[derive(Default)]
    struct ScriptedSocket {
        inbound: VecDeque<Result<Message, axum::Error>>,
        sent: Vec<Message>,
        fail_sends: bool,
        closed: bool,
    }

    impl ScriptedSocket {
        fn new(inbound: Vec<Result<Message, axum::Error>>) -> Self {
            Self {
                inbound: inbound.into(),
                ..Self::default()
            }
        }
    }

    impl Stream for ScriptedSocket {
        type Item = Result<Message, axum::Error>;

        fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            Poll::Ready(self.inbound.pop_front())
        }
    }

    impl Sink<Message> for ScriptedSocket {
        type Error = axum::Error;

        fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(mut self: Pin<&mut Self>, item: Message) -> Result<(), Self::Error> {
            if self.fail_sends {
                return Err(axum::Error::new(std::io::Error::other("broken pipe")));
            }
            self.sent.push(item);
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            self.closed = true;
            Poll::Ready(Ok(()))
        }
    }

    fn reset() -> axum::Error {
        axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
    }

    #[tokio::test]
    async fn echoes_in_order_until_close() {
        let mut socket = ScriptedSocket::new(vec![
            Ok(Message::text("one")),
            Ok(Message::binary(vec![0x00_u8, 0xFF, 0x10])),
            Ok(Message::text("two")),
            Ok(Message::Close(None)),
            Ok(Message::text("after close")),
        ]);

        let Ok(summary) = echo_loop(&mut socket).await else {
            panic!("peer close is not an error");
        };

        assert_eq!(
            socket.sent,
            vec![
                Message::text("one"),
                Message::binary(vec![0x00_u8, 0xFF, 0x10]),
                Message::text("two"),
            ]
        );
        assert_eq!(summary.text_frames, 2);
        assert_eq!(summary.binary_frames, 1);
        assert!(socket.closed);
    }

    #[tokio::test]
    async fn repeated_message_yields_repeated_echo() {
        let mut socket = ScriptedSocket::new(vec![
            Ok(Message::text("ping")),
            Ok(Message::text("ping")),
        ]);

        let result = echo_loop(&mut socket).await;
        assert!(result.is_ok());
        assert_eq!(socket.sent, vec![Message::text("ping"), Message::text("ping")]);
    }

    #[tokio::test]
    async fn stream_end_without_close_frame_is_clean() {
        let mut socket = ScriptedSocket::new(vec![Ok(Message::text("last"))]);

        let Ok(summary) = echo_loop(&mut socket).await else {
            panic!("stream end is not an error");
        };
        assert_eq!(summary.frames(), 1);
        assert!(socket.closed);
    }

    #[tokio::test]
    async fn control_frames_are_not_echoed() {
        let mut socket = ScriptedSocket::new(vec![
            Ok(Message::Ping(vec![1_u8].into())),
            Ok(Message::Pong(vec![2_u8].into())),
            Ok(Message::text("data")),
        ]);

        let result = echo_loop(&mut socket).await;
        assert!(result.is_ok());
        assert_eq!(socket.sent, vec![Message::text("data")]);
    }

    #[tokio::test]
    async fn read_error_stops_loop_and_closes_socket() {
        let mut socket = ScriptedSocket::new(vec![
            Ok(Message::text("before")),
            Err(reset()),
            Ok(Message::text("never read")),
        ]);

        let result = echo_loop(&mut socket).await;
        assert!(matches!(result, Err(EchoError::Transport(_))));
        assert_eq!(socket.sent, vec![Message::text("before")]);
        assert!(socket.closed);
    }

    #[tokio::test]
    async fn write_error_stops_loop_and_closes_socket() {
        let mut socket = ScriptedSocket::new(vec![Ok(Message::text("lost"))]);
        socket.fail_sends = true;

        let result = echo_loop(&mut socket).await;
        assert!(matches!(result, Err(EchoError::Transport(_))));
        assert!(socket.sent.is_empty());
        assert!(socket.closed);
    }
}
