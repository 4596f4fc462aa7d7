//! Core error types for lubemon.

use thiserror::Error;

/// Core error type for lubemon operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
