//! Client error types.

use thiserror::Error;

// ============================================================================
// Client Error
// ============================================================================

/// Error type for LubeLogger API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent, timed out, or the body could not be read.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server rejected the credentials.
    #[error("Authentication failed for {url}")]
    Unauthorized {
        /// Requested URL.
        url: String,
    },

    /// Server answered with an unexpected status.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The configured base URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Probe Error
// ============================================================================

/// Error type for the capability probe.
///
/// These are setup-time failures: a probe that cannot classify the server
/// means the configuration is unusable, not that one fetch went wrong.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Credentials were rejected while probing.
    #[error("Authentication failed: check username and password")]
    InvalidAuth,

    /// No candidate endpoint gave a usable answer.
    #[error("Cannot connect to LubeLogger: {0}")]
    CannotConnect(String),
}
