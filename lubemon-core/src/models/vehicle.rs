//! Vehicle identity resolution.

use serde::{Deserialize, Serialize};

use crate::fields::{VEHICLE_ID_KEYS, VEHICLE_NAME_KEYS};
use crate::models::record::{value_as_id, Record};

/// A vehicle known to the LubeLogger server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Server-side vehicle id, used to scope record queries.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// The raw vehicle record, kept for downstream consumers.
    pub info: Record,
}

impl Vehicle {
    /// Builds a vehicle from its API record.
    ///
    /// Returns `None` when no usable id is found. An id of zero is also
    /// unusable: it cannot address a vehicle in record queries.
    pub fn from_record(record: Record) -> Option<Self> {
        let id = record.first_present(VEHICLE_ID_KEYS).and_then(value_as_id)?;
        if id == 0 {
            return None;
        }
        let name = record
            .text_field(VEHICLE_NAME_KEYS)
            .map_or_else(|| format!("Vehicle {id}"), str::to_string);
        Some(Self {
            id,
            name,
            info: record,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
