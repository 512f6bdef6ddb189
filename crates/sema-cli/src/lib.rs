//! # sema-cli
//!
//! Command-line interface for the sema schema registry.
//!
//! ## Commands
//!
//! - `sema new-schema` - Publish a new schema and its origin alias
//!
//! ## Configuration
//!
//! Flags fall back to environment variables where noted:
//!
//! - `SEMA_BROKER` - Broker bootstrap address (default `localhost:9092`)
//! - `SEMA_EXPLORER` - Explorer base URL for the pre-publish check

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]

pub mod commands;

use clap::{Parser, Subcommand};

/// sema - schema registry command-line interface.
#[derive(Debug, Parser)]
#[command(name = "sema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Publish a new schema and bind its origin alias (`<name>-v0`).
    NewSchema(commands::new_schema::NewSchemaArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_new_schema_flags() {
        let cli = Cli::parse_from([
            "sema",
            "new-schema",
            "--name",
            "sensor-reading",
            "--broker",
            "broker0:9092",
            "--skip-check",
        ]);

        let Commands::NewSchema(args) = cli.command;
        assert_eq!(args.name, "sensor-reading");
        assert_eq!(args.broker, "broker0:9092");
        assert!(args.skip_check);
        assert!(args.from_url.is_none());
    }
}
