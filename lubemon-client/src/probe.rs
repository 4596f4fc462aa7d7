//! Capability probing.
//!
//! LubeLogger moved its vehicles endpoint between releases, and self-hosted
//! instances sometimes sit behind path rewrites. Setup therefore walks a
//! candidate list once, remembers the first path that answers, and falls
//! back to flat instance-wide fetches when no vehicles endpoint exists.

use tracing::{debug, info, warn};

use crate::api::ApiCapability;
use crate::client::{LubeLoggerClient, Payload};
use crate::endpoints::{RecordKind, VEHICLES_PATH_CANDIDATES};
use crate::error::{ClientError, ProbeError};

/// What the probe found out about a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    /// The fetch layout the server supports.
    pub capability: ApiCapability,
    /// Vehicles path that answered, for per-vehicle servers.
    pub vehicles_path: Option<String>,
}

impl LubeLoggerClient {
    /// Probes the server and memoizes the discovered vehicles path.
    ///
    /// Walks [`VEHICLES_PATH_CANDIDATES`] in order: the first 2xx answer
    /// selects per-vehicle layout; a 401 anywhere means the credentials are
    /// bad and nothing further is tried. When every candidate 404s cleanly
    /// the server is taken for an older flat instance, verified against the
    /// odometer endpoint so an unreachable server cannot pass as flat.
    ///
    /// # Errors
    ///
    /// [`ProbeError::InvalidAuth`] when credentials are rejected,
    /// [`ProbeError::CannotConnect`] when no usable answer was seen.
    pub async fn probe(&self) -> Result<ProbeReport, ProbeError> {
        let mut last_error: Option<String> = None;

        for candidate in VEHICLES_PATH_CANDIDATES {
            match self.get(candidate).await {
                Ok(Payload::Missing) => {
                    debug!(path = candidate, "Probe: not found");
                }
                Ok(_) => {
                    info!(path = candidate, "Probe: vehicles endpoint found");
                    self.remember_vehicles_path(candidate);
                    return Ok(ProbeReport {
                        capability: ApiCapability::PerVehicle,
                        vehicles_path: Some((*candidate).to_string()),
                    });
                }
                Err(ClientError::Unauthorized { .. }) => return Err(ProbeError::InvalidAuth),
                Err(err) => {
                    warn!(path = candidate, error = %err, "Probe: candidate failed");
                    last_error = Some(err.to_string());
                }
            }
        }

        if let Some(last_error) = last_error {
            return Err(ProbeError::CannotConnect(last_error));
        }

        // Every candidate 404'd cleanly. Old servers without a vehicles
        // endpoint still serve the record endpoints, so check one before
        // settling on flat layout.
        match self.get(self.record_path(RecordKind::Odometer)).await {
            Ok(_) => {
                info!("Probe: no vehicles endpoint, using flat layout");
                Ok(ProbeReport {
                    capability: ApiCapability::Flat,
                    vehicles_path: None,
                })
            }
            Err(ClientError::Unauthorized { .. }) => Err(ProbeError::InvalidAuth),
            Err(err) => Err(ProbeError::CannotConnect(err.to_string())),
        }
    }
}
