//! ws-echo server entry point.
//!
//! Loads configuration, binds the listening socket and serves WebSocket
//! echo sessions until the process is terminated.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use ws_echo::config::EchoConfig;
use ws_echo::error::EchoError;
use ws_echo::server::EchoServer;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, code = err.error_code(), "ws-echo terminated");
            // Not subject to RUST_LOG filtering.
            eprintln!("ws-echo: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), EchoError> {
    // Load configuration
    let config = EchoConfig::from_env()?;
    tracing::info!(addr = %config.bind_addr(), "starting ws-echo");

    // Bind before serving so a busy port fails fast
    let server = EchoServer::bind(&config).await?;

    server.serve().await
}
