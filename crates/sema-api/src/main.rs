//! `sema-api` binary entrypoint.
//!
//! Loads configuration from environment variables, starts the log tail,
//! and serves the explorer until ctrl-c.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

use anyhow::Result;

use sema_api::config::Config;
use sema_api::server::Server;
use sema_core::observability::{LogFormat, init_logging};

fn choose_log_format(config: &Config) -> LogFormat {
    if config.debug {
        LogFormat::Compact
    } else {
        LogFormat::Json
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(choose_log_format(&config));

    Server::new(config).serve().await?;
    Ok(())
}
