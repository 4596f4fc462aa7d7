//! Check command - validates connection settings against the server.

use anyhow::Result;
use lubemon_client::{LubeLoggerClient, ProbeError};
use lubemon_core::ApiMode;

use crate::config::resolve_connection;
use crate::output::{CheckOutput, JsonFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the check command.
///
/// Exit codes: 0 when the server answered, 2 when it rejected the
/// credentials, 1 when it could not be reached.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = resolve_connection(cli)?;
    let client = LubeLoggerClient::new(&config)?;

    let (output, code) = match client.probe().await {
        Ok(report) => (
            CheckOutput {
                ok: true,
                mode: Some(ApiMode::from(report.capability).as_str().to_string()),
                vehicles_path: report.vehicles_path,
                error: None,
            },
            ExitCode::Success,
        ),
        Err(ProbeError::InvalidAuth) => (
            CheckOutput {
                ok: false,
                mode: None,
                vehicles_path: None,
                error: Some("invalid credentials".to_string()),
            },
            ExitCode::AuthFailed,
        ),
        Err(ProbeError::CannotConnect(reason)) => (
            CheckOutput {
                ok: false,
                mode: None,
                vehicles_path: None,
                error: Some(reason),
            },
            ExitCode::Error,
        ),
    };

    if cli.format == OutputFormat::Json {
        println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
    } else if output.ok {
        let mode = output.mode.as_deref().unwrap_or("auto");
        println!("{} {} ({})", ok_mark(cli.no_color), config.base_url, mode);
        if cli.verbose {
            if let Some(path) = &output.vehicles_path {
                println!("  vehicles endpoint: {path}");
            }
        }
    } else {
        let reason = output.error.as_deref().unwrap_or("unknown");
        println!("{} {}: {}", fail_mark(cli.no_color), config.base_url, reason);
    }

    Ok(code)
}

fn ok_mark(no_color: bool) -> &'static str {
    if no_color { "✓" } else { "\x1b[32m✓\x1b[0m" }
}

fn fail_mark(no_color: bool) -> &'static str {
    if no_color { "✗" } else { "\x1b[31m✗\x1b[0m" }
}
