//! # ws-echo
//!
//! Minimal WebSocket echo server.
//!
//! Every text or binary frame a client sends is returned to that same
//! client, unchanged and in order. Connections from any origin (or with no
//! `Origin` header at all) are accepted, and each connection is served by
//! its own task with no state shared between connections.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, any path)
//!     │
//!     ├── EchoServer (server.rs)      bind + accept loop
//!     ├── System routes (api/)        GET /health
//!     ├── WS Handler (ws/handler.rs)  upgrade, origin-agnostic
//!     │
//!     └── Echo loop (ws/connection.rs), one task per connection
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod ws;
