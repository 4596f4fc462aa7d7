//! Domain models for lubemon.
//!
//! ## Submodules
//!
//! - [`record`] - Raw records, sort keys, latest-record selection
//! - [`vehicle`] - Vehicle identity resolution
//! - [`snapshot`] - Field sets and published snapshots

mod record;
mod snapshot;
mod vehicle;

// Re-export everything at the models level
pub use record::{records_from_value, select_latest, Record, SortKey};
pub use snapshot::{FieldSet, Snapshot, SnapshotData, VehicleSnapshot};
pub use vehicle::Vehicle;
