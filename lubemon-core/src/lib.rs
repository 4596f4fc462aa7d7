// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # lubemon Core
//!
//! Core types and record policy for lubemon.
//!
//! This crate provides the foundational pieces shared by the client,
//! coordinator, and CLI:
//!
//! - Loosely typed API records with candidate-key lookups
//! - Latest-record selection (sort keys, tie handling)
//! - The snapshot model published after each refresh cycle
//! - Connection settings and API modes
//!
//! ## Key Types
//!
//! - [`Record`] - One raw API record with typed field access
//! - [`SortKey`] - Ordering key for latest-record selection
//! - [`Vehicle`] - Resolved vehicle identity
//! - [`FieldSet`] - The four tracked fields for one scope
//! - [`Snapshot`] / [`VehicleSnapshot`] - What one refresh cycle observed
//! - [`ConnectionConfig`] / [`ApiMode`] - Server connection settings

pub mod config;
pub mod error;
pub mod fields;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export config types
pub use config::{normalize_url, ApiMode, ConnectionConfig, DEFAULT_UPDATE_INTERVAL_SECS};

// Re-export all model types
pub use models::{
    records_from_value, select_latest, FieldSet, Record, Snapshot, SnapshotData, SortKey, Vehicle,
    VehicleSnapshot,
};
