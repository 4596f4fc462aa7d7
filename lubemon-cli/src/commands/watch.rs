//! Watch command - polls continuously, reprinting on every refresh.

use std::io::{Write, stdout};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use lubemon_core::{ConnectionConfig, Snapshot};
use lubemon_coordinator::UpdateCoordinator;
use tracing::info;

use crate::config::resolve_connection;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds (overrides the config file).
    #[arg(long, short)]
    pub interval: Option<u64>,
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<ExitCode> {
    let mut config = resolve_connection(cli)?;
    if let Some(secs) = args.interval {
        config.update_interval_secs = secs;
    }

    info!(
        interval = config.update_interval().as_secs(),
        "Starting watch mode"
    );

    let coordinator = Arc::new(UpdateCoordinator::new(&config)?);

    let first = coordinator.first_refresh().await?;
    print_snapshot(&first, cli, &config)?;

    // Subscribe after the first refresh so it is not reprinted.
    let mut updates = coordinator.subscribe();
    let poller = coordinator.spawn();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = updates.borrow_and_update().clone();
                if let Some(snapshot) = current {
                    print_snapshot(&snapshot, cli, &config)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    coordinator.shutdown();
    poller.await?;

    Ok(ExitCode::Success)
}

/// Prints one refresh. Text mode redraws the screen, JSON mode emits one
/// document per line.
fn print_snapshot(snapshot: &Snapshot, cli: &Cli, config: &ConnectionConfig) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(snapshot)?);
        }
        OutputFormat::Text => {
            // Clear screen
            print!("\x1b[2J\x1b[H");

            let now = chrono::Local::now();
            println!(
                "LubeMon Watch - {} (refresh: {}s)",
                now.format("%H:%M:%S"),
                config.update_interval().as_secs()
            );
            println!("{}", "─".repeat(50));
            println!();
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_snapshot(snapshot));
        }
    }
    stdout().flush()?;
    Ok(())
}
