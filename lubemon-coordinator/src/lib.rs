// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # lubemon Coordinator
//!
//! Refresh scheduling and snapshot publication.
//!
//! The [`UpdateCoordinator`] sits between the HTTP client and whatever
//! consumes the data. It:
//!
//! - runs one fetch cycle per interval tick, never two at once
//! - fans out across vehicles and the four tracked fields concurrently
//! - degrades failures to `None` fields (or an empty vehicle list) with a
//!   warning, instead of surfacing errors after setup
//! - publishes each completed [`Snapshot`](lubemon_core::Snapshot) over a
//!   watch channel
//!
//! ## Usage
//!
//! ```ignore
//! let coordinator = Arc::new(UpdateCoordinator::new(&config)?);
//! coordinator.first_refresh().await?;
//! let task = coordinator.spawn();
//!
//! let mut updates = coordinator.subscribe();
//! while updates.changed().await.is_ok() {
//!     if let Some(snapshot) = updates.borrow().clone() {
//!         println!("{} vehicles", snapshot.vehicles().len());
//!     }
//! }
//! ```

pub mod coordinator;
pub mod error;

// Re-export key types at crate root
pub use coordinator::UpdateCoordinator;
pub use error::SetupError;
