//! Server configuration.

use std::net::SocketAddr;

use sema_core::error::{Error, Result};

const ENV_BROKER: &str = "SEMA_BROKER";
const ENV_LISTEN: &str = "SEMA_LISTEN";
const ENV_DEBUG: &str = "SEMA_DEBUG";

const DEFAULT_BROKER: &str = "localhost:9092";
const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Explorer configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Broker bootstrap address.
    pub broker: String,
    /// Address the HTTP server binds to.
    pub listen: SocketAddr,
    /// Development mode: human-readable logs instead of JSON.
    pub debug: bool,
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// - `SEMA_BROKER`: broker address (default `localhost:9092`)
    /// - `SEMA_LISTEN`: bind address (default `0.0.0.0:8080`)
    /// - `SEMA_DEBUG`: `1`/`true` for development mode
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `SEMA_LISTEN` is not a valid
    /// socket address.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration with a custom environment source.
    ///
    /// This entry point is test-friendly and accepts a key lookup
    /// function.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the listen address is
    /// malformed.
    pub fn from_env_with<F>(get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let broker = get_env(ENV_BROKER).unwrap_or_else(|| DEFAULT_BROKER.to_string());

        let listen_raw = get_env(ENV_LISTEN).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen: SocketAddr = listen_raw.parse().map_err(|_| {
            Error::configuration(format!("{ENV_LISTEN} is not a socket address: '{listen_raw}'"))
        })?;

        let debug = get_env(ENV_DEBUG)
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

        Ok(Self {
            broker,
            listen,
            debug,
        })
    }
}
