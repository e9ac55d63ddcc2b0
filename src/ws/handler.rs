//! Axum WebSocket upgrade handler.

use std::net::SocketAddr;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::http::header::{ORIGIN, UPGRADE};
use axum::response::{IntoResponse, Response};

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::error::HandshakeError;

/// Upgrades any request path to a WebSocket echo session.
///
/// The `Origin` header is never checked: requests from any origin, and
/// requests without one, are accepted.
///
/// # Errors
///
/// Returns [`HandshakeError`] for requests that are not valid upgrade
/// requests; the response closes the connection.
pub async fn ws_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, HandshakeError> {
    let upgrade = upgrade.map_err(|rejection| {
        let err = HandshakeError::from(rejection);
        tracing::debug!(%peer, error = %err, "ws handshake rejected");
        err
    })?;

    let origin = headers.get(ORIGIN).and_then(|v| v.to_str().ok());
    tracing::debug!(%peer, origin = origin.unwrap_or("<none>"), "ws upgrade accepted");

    Ok(upgrade
        .max_message_size(state.max_message_bytes)
        .on_failed_upgrade(move |err: axum::Error| {
            tracing::debug!(%peer, error = %err, "ws upgrade failed after handshake");
        })
        .on_upgrade(move |socket| run_connection(socket, peer))
        .into_response())
}

/// Returns `true` if the request asks for a protocol upgrade.
///
/// Routes that serve plain HTTP use this to hand upgrade attempts to
/// [`ws_handler`] instead of answering them.
#[must_use]
pub fn wants_upgrade(headers: &HeaderMap) -> bool {
    headers.contains_key(UPGRADE)
}
