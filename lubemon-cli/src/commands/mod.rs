//! CLI command implementations.

pub mod check;
pub mod snapshot;
pub mod vehicles;
pub mod watch;
