//! WebSocket layer: upgrade handling and the per-connection echo loop.
//!
//! Every path except the reserved system routes accepts an upgrade; each
//! upgraded connection is served by its own task.

pub mod connection;
pub mod frame;
pub mod handler;
