//! Snapshot command - one refresh, printed, done.

use anyhow::Result;
use lubemon_coordinator::UpdateCoordinator;

use crate::config::resolve_connection;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the snapshot command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = resolve_connection(cli)?;
    let coordinator = UpdateCoordinator::new(&config)?;
    let snapshot = coordinator.first_refresh().await?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(snapshot.as_ref())?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_snapshot(&snapshot));
        }
    }

    Ok(ExitCode::Success)
}
