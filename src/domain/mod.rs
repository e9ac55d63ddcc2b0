//! Domain types: connection identity and per-connection echo accounting.

pub mod connection_id;
pub mod echo_summary;

pub use connection_id::ConnectionId;
pub use echo_summary::EchoSummary;
