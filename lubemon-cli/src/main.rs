// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! LubeMon CLI - LubeLogger vehicle data from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Validate connection settings against a server
//! lubemon check --url http://lubelogger.lan:8080 -u admin -p secret
//!
//! # One snapshot of every vehicle
//! lubemon snapshot
//!
//! # JSON output
//! lubemon snapshot --format json --pretty
//!
//! # List vehicles
//! lubemon vehicles
//!
//! # Poll until Ctrl-C
//! lubemon watch --interval 60
//! ```

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lubemon_core::ApiMode;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{check, snapshot, vehicles, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// LubeMon CLI - LubeLogger vehicle data monitoring.
#[derive(Parser)]
#[command(name = "lubemon")]
#[command(about = "LubeLogger vehicle data monitoring CLI")]
#[command(long_about = r#"
LubeMon polls a LubeLogger server over its HTTP API and reports, per
vehicle, the latest odometer reading, the next maintenance plan, the
latest tax record and the latest service record.

Connection settings come from the flags below or from a JSON config
file (see --config); flags win.

Examples:
  lubemon check --url http://lubelogger.lan:8080 -u admin -p secret
  lubemon snapshot                   # One refresh, print, exit
  lubemon snapshot --format json     # Machine-readable output
  lubemon vehicles                   # List vehicles with ids
  lubemon watch --interval 60        # Poll until Ctrl-C
"#)]
#[command(version)]
#[command(author = "LubeMon Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'snapshot' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the LubeLogger server.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Basic-auth username.
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Basic-auth password.
    #[arg(long, short = 'p', global = true)]
    pub password: Option<String>,

    /// Path to the config file (default: <config dir>/lubemon/config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fetch scoping mode (auto, per_vehicle, flat).
    #[arg(long, global = true)]
    pub mode: Option<ApiMode>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate connection settings against the server.
    #[command(visible_alias = "c")]
    Check,

    /// Fetch one snapshot and print it (default if no command specified).
    #[command(visible_alias = "s")]
    Snapshot,

    /// List vehicles known to the server.
    #[command(visible_alias = "v")]
    Vehicles,

    /// Poll continuously, reprinting on every refresh.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error, including unreachable servers.
    Error = 1,
    /// The server rejected the credentials.
    AuthFailed = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("lubemon=debug,lubemon_client=debug,lubemon_coordinator=debug,info")
    } else {
        EnvFilter::new("lubemon=warn,lubemon_client=warn,lubemon_coordinator=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Check) => check::run(&cli).await,
        Some(Commands::Snapshot) | None => snapshot::run(&cli).await,
        Some(Commands::Vehicles) => vehicles::run(&cli).await,
        Some(Commands::Watch(args)) => watch::run(args, &cli).await,
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
