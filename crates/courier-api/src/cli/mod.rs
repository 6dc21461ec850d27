//! CLI command definitions for the `courier` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod db;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Message ingestion API with content filtering.
#[derive(Parser)]
#[command(name = "courier", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, global = true, env = "COURIER_CONFIG", default_value = "courier.toml")]
    pub config: PathBuf,

    /// SQLite database file (overrides `database_path` from the config file).
    #[arg(long, global = true, env = "COURIER_DATABASE")]
    pub database: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the database and apply migrations, then exit.
    InitDb,
}

impl Cli {
    /// Default log filter derived from `-v` / `--quiet`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,courier=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "courier",
            "--config",
            "/etc/courier.toml",
            "serve",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/courier.toml"));
        assert_eq!(cli.log_filter(), "info,courier=debug");
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            Commands::InitDb => panic!("expected serve"),
        }
    }

    #[test]
    fn parse_init_db_with_database_override() {
        let cli = Cli::try_parse_from([
            "courier",
            "init-db",
            "--database",
            "data/m.db",
            "--quiet",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::InitDb));
        assert_eq!(cli.database, Some(PathBuf::from("data/m.db")));
        assert_eq!(cli.log_filter(), "error");
    }
}
