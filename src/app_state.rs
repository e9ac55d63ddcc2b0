//! Read-only settings injected into all Axum handlers.

use crate::config::EchoConfig;

/// Per-server settings available to handlers via Axum's `State` extractor.
///
/// Immutable after startup; connections never share mutable state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Largest inbound WebSocket message accepted on a connection.
    pub max_message_bytes: usize,
}

impl From<&EchoConfig> for AppState {
    fn from(config: &EchoConfig) -> Self {
        Self {
            max_message_bytes: config.max_message_bytes,
        }
    }
}
