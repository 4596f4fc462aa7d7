//! The update coordinator.
//!
//! Owns the refresh cadence and the published snapshot. Each cycle fetches
//! everything it needs, assembles a complete [`Snapshot`], and only then
//! publishes it over a watch channel; consumers either see the previous
//! snapshot or the new one, never a half-filled state.
//!
//! Failure policy: a failed field fetch degrades that one field to `None`
//! with a warning, a failed vehicle enumeration degrades the whole cycle to
//! an empty vehicle list. Cycles themselves are infallible after setup.

use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use lubemon_client::{LubeLoggerClient, RecordKind, VehicleDataApi};
use lubemon_core::{
    ApiMode, ConnectionConfig, FieldSet, Record, Snapshot, Vehicle, VehicleSnapshot,
};

use crate::error::SetupError;

// ============================================================================
// Update Coordinator
// ============================================================================

/// Polls a LubeLogger server and publishes snapshots.
pub struct UpdateCoordinator {
    api: Arc<dyn VehicleDataApi>,
    /// Mode in effect; `Auto` only until the first refresh resolves it.
    mode: StdMutex<ApiMode>,
    update_interval: Duration,
    publish: watch::Sender<Option<Arc<Snapshot>>>,
    /// Held for a whole cycle so cycles never interleave.
    refresh_gate: Mutex<()>,
    shutdown: watch::Sender<bool>,
}

impl UpdateCoordinator {
    /// Creates a coordinator backed by a real client.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built from the settings.
    pub fn new(config: &ConnectionConfig) -> Result<Self, SetupError> {
        let client = LubeLoggerClient::new(config)?;
        Ok(Self::with_api(
            Arc::new(client),
            config.mode,
            config.update_interval(),
        ))
    }

    /// Creates a coordinator over any data-access implementation.
    pub fn with_api(
        api: Arc<dyn VehicleDataApi>,
        mode: ApiMode,
        update_interval: Duration,
    ) -> Self {
        let (publish, _) = watch::channel(None);
        let (shutdown, _) = watch::channel(false);
        Self {
            api,
            mode: StdMutex::new(mode),
            update_interval,
            publish,
            refresh_gate: Mutex::new(()),
            shutdown,
        }
    }

    /// The API mode currently in effect.
    pub fn mode(&self) -> ApiMode {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_mode(&self, mode: ApiMode) {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    /// Seconds between automatic refresh cycles.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// The most recently published snapshot, if any cycle has completed.
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.publish.borrow().clone()
    }

    /// Subscribes to snapshot publications.
    ///
    /// The receiver starts at the current value; every completed cycle
    /// replaces it.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Snapshot>>> {
        self.publish.subscribe()
    }

    /// Returns true once [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// First refresh: resolves the API mode if configured auto, then runs
    /// one full cycle and publishes it.
    ///
    /// # Errors
    ///
    /// Fails only when the capability probe fails; an explicitly configured
    /// mode skips the probe entirely. Fetch failures inside the cycle do
    /// not fail setup, they degrade the snapshot like in any later cycle.
    pub async fn first_refresh(&self) -> Result<Arc<Snapshot>, SetupError> {
        if self.mode() == ApiMode::Auto {
            let capability = self.api.resolve_capability().await?;
            let mode = ApiMode::from(capability);
            info!(mode = %mode, "Resolved API mode");
            self.set_mode(mode);
        }
        Ok(self.refresh().await)
    }

    /// Runs one full refresh cycle: fetch, assemble, publish.
    ///
    /// Cycles are serialized; a call that arrives while another cycle runs
    /// waits for the gate rather than interleaving fetches.
    pub async fn refresh(&self) -> Arc<Snapshot> {
        let _gate = self.refresh_gate.lock().await;
        let snapshot = Arc::new(self.run_cycle().await);
        if !self.is_shut_down() {
            self.publish.send_replace(Some(snapshot.clone()));
        }
        snapshot
    }

    async fn run_cycle(&self) -> Snapshot {
        match self.mode() {
            ApiMode::Flat => Snapshot::flat(self.field_set(None).await),
            // Auto never survives first_refresh; treat it as per-vehicle.
            ApiMode::Auto | ApiMode::PerVehicle => self.vehicle_cycle().await,
        }
    }

    async fn vehicle_cycle(&self) -> Snapshot {
        let records = match self.api.vehicles().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Error fetching vehicles");
                Vec::new()
            }
        };
        // Vehicles without a usable id are dropped here.
        let vehicles: Vec<Vehicle> = records
            .into_iter()
            .filter_map(Vehicle::from_record)
            .collect();
        debug!(count = vehicles.len(), "Refreshing vehicles");
        let slices = join_all(
            vehicles
                .into_iter()
                .map(|vehicle| self.vehicle_slice(vehicle)),
        )
        .await;
        Snapshot::for_vehicles(slices)
    }

    async fn vehicle_slice(&self, vehicle: Vehicle) -> VehicleSnapshot {
        let fields = self.field_set(Some(vehicle.id)).await;
        VehicleSnapshot::new(vehicle, fields)
    }

    /// Fetches the four fields concurrently; each failure degrades its own
    /// field to `None`.
    async fn field_set(&self, vehicle_id: Option<i64>) -> FieldSet {
        let (latest_odometer, next_plan, latest_tax, latest_service) = tokio::join!(
            self.guarded(RecordKind::Odometer, vehicle_id),
            self.guarded(RecordKind::Plan, vehicle_id),
            self.guarded(RecordKind::Tax, vehicle_id),
            self.guarded(RecordKind::Service, vehicle_id),
        );
        FieldSet {
            latest_odometer,
            next_plan,
            latest_tax,
            latest_service,
        }
    }

    async fn guarded(&self, kind: RecordKind, vehicle_id: Option<i64>) -> Option<Record> {
        let result = match kind {
            RecordKind::Odometer => self.api.latest_odometer(vehicle_id).await,
            RecordKind::Plan => self.api.next_plan(vehicle_id).await,
            RecordKind::Tax => self.api.latest_tax(vehicle_id).await,
            RecordKind::Service => self.api.latest_service(vehicle_id).await,
        };
        match result {
            Ok(record) => record,
            Err(err) => {
                warn!(field = %kind, vehicle_id = ?vehicle_id, error = %err, "Field fetch failed");
                None
            }
        }
    }

    /// Runs the polling loop until shutdown.
    ///
    /// The first automatic cycle fires one interval after this starts;
    /// callers are expected to have run [`first_refresh`](Self::first_refresh)
    /// already. Ticks that land while a cycle is still running are skipped,
    /// not queued.
    pub async fn run(&self) {
        let mut ticker = interval_at(Instant::now() + self.update_interval, self.update_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut shutdown = self.shutdown.subscribe();
        if *shutdown.borrow() {
            return;
        }
        info!(
            interval_secs = self.update_interval.as_secs(),
            "Polling started"
        );
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = self.refresh() => {}
                        // Abandon the in-flight cycle; nothing gets published.
                        _ = shutdown.changed() => break,
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
        debug!("Polling stopped");
    }

    /// Spawns the polling loop on the current runtime.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.run().await })
    }

    /// Stops polling. An in-flight cycle is abandoned without publishing.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

// ============================================================================
// Tests
// ============================================================================
