// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # lubemon Client
//!
//! HTTP access to a LubeLogger server.
//!
//! This crate owns everything wire-level:
//!
//! - [`LubeLoggerClient`] - authenticated GETs with status triage and
//!   content-type-aware body handling
//! - [`EndpointTable`] / [`RecordKind`] - the API paths in play
//! - Capability probing ([`ProbeReport`]) - finds the vehicles endpoint or
//!   falls back to flat instance-wide fetches
//! - [`VehicleDataApi`] - the seam the update coordinator consumes
//! - [`testing`] - an in-process stub server for wire-level tests
//!
//! Record selection policy (sort keys, candidate fields) lives in
//! `lubemon-core`; this crate only applies it to fetched batches.

// Core modules
pub mod api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod probe;
pub mod testing;

// Re-export key types at crate root

// Errors
pub use error::{ClientError, ProbeError};

// Client & endpoints
pub use client::LubeLoggerClient;
pub use endpoints::{EndpointTable, RecordKind, VEHICLES_PATH_CANDIDATES};

// Probe & seam
pub use api::{ApiCapability, VehicleDataApi};
pub use probe::ProbeReport;
