//! Vehicles command - lists vehicles known to the server.

use anyhow::Result;
use lubemon_client::{LubeLoggerClient, VehicleDataApi};
use lubemon_core::Vehicle;

use crate::config::resolve_connection;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the vehicles command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = resolve_connection(cli)?;
    let client = LubeLoggerClient::new(&config)?;

    let vehicles: Vec<Vehicle> = client
        .vehicles()
        .await?
        .into_iter()
        .filter_map(Vehicle::from_record)
        .collect();

    match cli.format {
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&vehicles)?);
        }
        OutputFormat::Text => {
            if vehicles.is_empty() {
                println!("No vehicles");
                return Ok(ExitCode::Success);
            }
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_vehicles_header());
            for vehicle in &vehicles {
                println!("{}", formatter.format_vehicle_line(vehicle));
            }
        }
    }

    Ok(ExitCode::Success)
}
