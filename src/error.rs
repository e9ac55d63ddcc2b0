//! Echo server error types.
//!
//! [`EchoError`] covers the failures that end the process or a connection.
//! [`HandshakeError`] is the only failure turned into an HTTP response: it
//! answers one rejected upgrade request and then closes that transport.
//! A peer closing its connection is not an error.

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::http::HeaderValue;
use axum::http::header::CONNECTION;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "websocket handshake rejected: Connection header did not include 'upgrade'"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum.
///
/// # Error Codes
///
/// | Code | Variant     | Scope          |
/// |------|-------------|----------------|
/// | 1002 | `Config`    | process, fatal |
/// | 3000 | `Serve`     | process, fatal |
/// | 3001 | `Bind`      | process, fatal |
/// | 3002 | `Transport` | one connection |
#[derive(Debug, thiserror::Error)]
pub enum EchoError {
    /// The listening socket could not be established.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the server tried to bind.
        addr: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on an established WebSocket connection.
    #[error("transport error: {0}")]
    Transport(#[from] axum::Error),

    /// A configuration value is present but unusable.
    #[error("invalid configuration for {key}: {reason}")]
    Config {
        /// Environment variable name.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// The accept loop stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl EchoError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Config { .. } => 1002,
            Self::Serve(_) => 3000,
            Self::Bind { .. } => 3001,
            Self::Transport(_) => 3002,
        }
    }
}

/// A request that could not be upgraded to a WebSocket (code 1001).
///
/// Rendered with the status chosen by the upgrade extractor (`400`, `405`,
/// `426`, ...) and `Connection: close`, so the transport is closed once the
/// rejection is written and no echo loop starts.
#[derive(Debug, thiserror::Error)]
#[error("websocket handshake rejected: {0}")]
pub struct HandshakeError(#[from] pub WebSocketUpgradeRejection);

impl HandshakeError {
    /// Numeric error code carried in the JSON body.
    pub const CODE: u32 = 1001;
}

impl IntoResponse for HandshakeError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: Self::CODE,
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONNECTION, HeaderValue::from_static("close"));
        response
    }
}
