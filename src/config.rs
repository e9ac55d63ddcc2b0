//! Server configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Variable                 | Default     |
//! |--------------------------|-------------|
//! | `ECHO_HOST`              | `localhost` |
//! | `ECHO_PORT`              | `8000`      |
//! | `ECHO_MAX_MESSAGE_BYTES` | `1048576`   |

use crate::error::EchoError;

/// Default bind host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Default upper bound for a single inbound message (1 MiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 1 << 20;

/// Top-level echo server configuration.
///
/// Loaded once at startup via [`EchoConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoConfig {
    /// Host name or IP literal to bind (e.g. `localhost`, `0.0.0.0`).
    pub host: String,

    /// TCP port to bind. `0` asks the OS for an ephemeral port.
    pub port: u16,

    /// Largest inbound message accepted before the connection is dropped.
    pub max_message_bytes: usize,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

impl EchoConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Config`] if `ECHO_PORT` is set but is not a
    /// valid port number, or if `ECHO_HOST` is set to an empty string.
    pub fn from_env() -> Result<Self, EchoError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// An unusable `ECHO_MAX_MESSAGE_BYTES` is logged at `warn` and replaced
    /// by the default.
    ///
    /// # Errors
    ///
    /// Same as [`EchoConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EchoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("ECHO_HOST") {
            Some(host) if host.trim().is_empty() => {
                return Err(EchoError::Config {
                    key: "ECHO_HOST",
                    reason: "must not be empty".to_string(),
                });
            }
            Some(host) => host.trim().to_string(),
            None => DEFAULT_HOST.to_string(),
        };

        let port = match lookup("ECHO_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|err| EchoError::Config {
                key: "ECHO_PORT",
                reason: format!("{raw:?} is not a port number: {err}"),
            })?,
            None => DEFAULT_PORT,
        };

        let max_message_bytes = match lookup("ECHO_MAX_MESSAGE_BYTES") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        key = "ECHO_MAX_MESSAGE_BYTES",
                        value = %raw,
                        default = DEFAULT_MAX_MESSAGE_BYTES,
                        "invalid value, using default"
                    );
                    DEFAULT_MAX_MESSAGE_BYTES
                }
            },
            None => DEFAULT_MAX_MESSAGE_BYTES,
        };

        Ok(Self {
            host,
            port,
            max_message_bytes,
        })
    }

    /// Returns the `host:port` string used for binding and diagnostics.
    ///
    /// IPv6 literals are bracketed (`[::1]:8000`).
    #[must_use]
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}
