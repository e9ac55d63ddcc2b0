//! Per-connection echo counters.

use axum::extract::ws::Message;

/// Counters for the frames echoed on a single connection.
///
/// Owned by the connection task and reported once when the connection ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoSummary {
    /// Text frames echoed.
    pub text_frames: u64,
    /// Binary frames echoed.
    pub binary_frames: u64,
    /// Payload bytes echoed across both frame types.
    pub bytes: u64,
}

impl EchoSummary {
    /// Accounts for one echoed message. Control frames are not counted.
    pub fn record(&mut self, message: &Message) {
        match message {
            Message::Text(text) => {
                self.text_frames += 1;
                self.bytes += text.len() as u64;
            }
            Message::Binary(data) => {
                self.binary_frames += 1;
                self.bytes += data.len() as u64;
            }
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) => {}
        }
    }

    /// Total data frames echoed.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.text_frames + self.binary_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_text_and_binary_separately() {
        let mut summary = EchoSummary::default();
        summary.record(&Message::text("hello"));
        summary.record(&Message::binary(vec![0x00_u8, 0xFF, 0x10]));
        summary.record(&Message::text("hello"));

        assert_eq!(summary.text_frames, 2);
        assert_eq!(summary.binary_frames, 1);
        assert_eq!(summary.bytes, 13);
        assert_eq!(summary.frames(), 3);
    }

    #[test]
    fn control_frames_are_ignored() {
        let mut summary = EchoSummary::default();
        summary.record(&Message::Ping(vec![1_u8, 2].into()));
        summary.record(&Message::Close(None));
        assert_eq!(summary, EchoSummary::default());
    }
}
