//! Snapshot model: what one refresh cycle observed.
//!
//! A [`Snapshot`] is assembled completely before it is published, so
//! consumers never see a half-filled one. Field values stay `None` when a
//! cycle could not produce them; consumers distinguish "no data" from
//! "no snapshot yet" by whether a snapshot exists at all.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{
    ODOMETER_VALUE_KEYS, PLAN_DUE_DATE_KEYS, SERVICE_DATE_KEYS, TAX_AMOUNT_KEYS,
};
use crate::models::record::Record;
use crate::models::vehicle::Vehicle;

// ============================================================================
// Field Set
// ============================================================================

/// The four tracked maintenance fields for one scope.
///
/// Each field carries the full winning record, or `None` when the cycle
/// could not produce one (endpoint missing, fetch failed, no records).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    /// Most recent odometer record.
    pub latest_odometer: Option<Record>,
    /// Upcoming plan record, in server order.
    pub next_plan: Option<Record>,
    /// Most recent tax record.
    pub latest_tax: Option<Record>,
    /// Most recent service record.
    pub latest_service: Option<Record>,
}

impl FieldSet {
    /// Odometer reading as a number, if the record carries one.
    pub fn odometer_value(&self) -> Option<f64> {
        self.latest_odometer
            .as_ref()?
            .number_field(ODOMETER_VALUE_KEYS)
    }

    /// Due date of the next plan entry.
    pub fn plan_due_date(&self) -> Option<DateTime<Utc>> {
        self.next_plan.as_ref()?.date_field(PLAN_DUE_DATE_KEYS)
    }

    /// Amount of the latest tax record.
    pub fn tax_amount(&self) -> Option<f64> {
        self.latest_tax.as_ref()?.number_field(TAX_AMOUNT_KEYS)
    }

    /// Date of the latest service record.
    pub fn service_date(&self) -> Option<DateTime<Utc>> {
        self.latest_service.as_ref()?.date_field(SERVICE_DATE_KEYS)
    }

    /// Returns true if any field holds a record.
    pub fn has_data(&self) -> bool {
        self.latest_odometer.is_some()
            || self.next_plan.is_some()
            || self.latest_tax.is_some()
            || self.latest_service.is_some()
    }
}

// ============================================================================
// Vehicle Snapshot
// ============================================================================

/// Per-vehicle slice of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Vehicle id.
    pub id: i64,
    /// Vehicle display name.
    pub name: String,
    /// Raw vehicle record.
    pub vehicle_info: Record,
    /// Tracked fields for this vehicle.
    #[serde(flatten)]
    pub fields: FieldSet,
}

impl VehicleSnapshot {
    /// Builds the slice for one vehicle.
    pub fn new(vehicle: Vehicle, fields: FieldSet) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            vehicle_info: vehicle.info,
            fields,
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything one refresh cycle observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When this snapshot was assembled.
    pub updated_at: DateTime<Utc>,
    /// Per-vehicle or flat body, depending on the API mode in effect.
    #[serde(flatten)]
    pub data: SnapshotData,
}

/// Snapshot body, shaped by the API mode in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotData {
    /// One slice per discovered vehicle.
    Vehicles {
        /// Slices in the order the server listed the vehicles.
        vehicles: Vec<VehicleSnapshot>,
    },
    /// Whole-instance fields, for servers without a vehicles endpoint.
    Flat(FieldSet),
}

impl Snapshot {
    /// Creates a per-vehicle snapshot stamped now.
    pub fn for_vehicles(vehicles: Vec<VehicleSnapshot>) -> Self {
        Self {
            updated_at: Utc::now(),
            data: SnapshotData::Vehicles { vehicles },
        }
    }

    /// Creates a flat snapshot stamped now.
    pub fn flat(fields: FieldSet) -> Self {
        Self {
            updated_at: Utc::now(),
            data: SnapshotData::Flat(fields),
        }
    }

    /// Returns true if this snapshot is stale (older than threshold).
    pub fn is_stale(&self, threshold: Duration) -> bool {
        Utc::now() - self.updated_at > threshold
    }

    /// Vehicle slices, empty for flat snapshots.
    pub fn vehicles(&self) -> &[VehicleSnapshot] {
        match &self.data {
            SnapshotData::Vehicles { vehicles } => vehicles,
            SnapshotData::Flat(_) => &[],
        }
    }

    /// Looks up one vehicle's slice by id.
    pub fn vehicle(&self, id: i64) -> Option<&VehicleSnapshot> {
        self.vehicles().iter().find(|v| v.id == id)
    }

    /// Flat fields, `None` for per-vehicle snapshots.
    pub fn flat_fields(&self) -> Option<&FieldSet> {
        match &self.data {
            SnapshotData::Flat(fields) => Some(fields),
            SnapshotData::Vehicles { .. } => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
