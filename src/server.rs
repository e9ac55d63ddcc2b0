//! Listening socket and router assembly.
//!
//! [`EchoServer::bind`] claims the address up front so a busy port is
//! reported before anything else starts; [`EchoServer::serve`] then runs
//! the accept loop until the process ends.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::EchoConfig;
use crate::error::EchoError;
use crate::ws::handler::ws_handler;

/// A bound, not yet serving, echo server.
#[derive(Debug)]
pub struct EchoServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl EchoServer {
    /// Binds the listening socket described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Bind`] if the address is already in use, cannot
    /// be resolved, or is otherwise unavailable. Binding is not retried.
    pub async fn bind(config: &EchoConfig) -> Result<Self, EchoError> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(addr.as_str())
            .await
            .map_err(|source| EchoError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| EchoError::Bind { addr, source })?;

        Ok(Self {
            listener,
            local_addr,
            router: build_router(AppState::from(config)),
        })
    }

    /// Returns the address actually bound (resolves port `0`).
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accepts connections until the process terminates.
    ///
    /// Each upgraded connection runs in its own task; per-connection
    /// failures never reach this loop.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Serve`] if the server stops with an I/O error.
    pub async fn serve(self) -> Result<(), EchoError> {
        tracing::info!(addr = %self.local_addr, "server listening");
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(EchoError::Serve)
    }
}

/// Builds the complete router: system routes plus the catch-all WebSocket
/// endpoint, with permissive CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::build_router())
        .fallback(ws_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
