// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Adoptions CLI
//!
//! The `adoptions` binary runs the shelter backend and manages its
//! configuration.
//!
//! ## Commands
//!
//! - `adoptions serve` - Run the HTTP API in the foreground
//! - `adoptions config show|validate|generate` - Configuration management
//! - `adoptions hash-password` - Produce a password digest for `security.users`

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;

use adoptions::commands::{self, ConfigCommand};
use adoptions::{daemon, logging};
use adoptions_core::domain::config::LoggingConfig;

/// Adoptions - Animal shelter backend
#[derive(Parser)]
#[command(name = "adoptions")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "ADOPTIONS_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP API port (overrides spec.server.port)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// HTTP API bind address (overrides spec.server.bind_address)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ADOPTIONS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format (text, json)
    #[arg(long, global = true, env = "ADOPTIONS_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    #[command(name = "serve")]
    Serve,

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Print the SHA-256 digest of a password
    #[command(name = "hash-password")]
    HashPassword {
        /// Plain-text password
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Flags win over spec.observability.logging
    let (settings, load_error) = match logging::read_logging_config(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => (LoggingConfig::default(), Some(e)),
    };
    let level = cli.log_level.as_deref().unwrap_or(&settings.level);
    let format = cli.log_format.as_deref().unwrap_or(&settings.format);
    logging::init_logging(level, format)?;

    if let Some(e) = load_error {
        warn!("Using default logging settings: {:#}", e);
    }

    match cli.command {
        Some(Commands::Serve) => {
            let overrides = daemon::ServeOverrides {
                host: cli.host,
                port: cli.port,
            };
            daemon::start_server(cli.config, overrides).await
        }
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        Some(Commands::HashPassword { password }) => {
            println!("{}", commands::password::hash_password(&password));
            Ok(())
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}
