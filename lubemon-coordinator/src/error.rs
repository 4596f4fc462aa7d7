//! Coordinator error types.

use thiserror::Error;

/// Error type for coordinator setup.
///
/// Only setup fails loudly. Once the coordinator is running, fetch problems
/// degrade the published snapshot instead of surfacing as errors.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The HTTP client could not be built from the connection settings.
    #[error("Client error: {0}")]
    Client(#[from] lubemon_client::ClientError),

    /// The capability probe failed.
    #[error("Probe failed: {0}")]
    Probe(#[from] lubemon_client::ProbeError),
}
