//! Endpoint paths and the probe candidate list.

use std::fmt;

/// Paths tried, in order, when probing for the vehicles endpoint.
///
/// Older servers expose PascalCase controller routes, newer ones the plural
/// lowercase form. The first path answering 2xx wins.
pub const VEHICLES_PATH_CANDIDATES: &[&str] = &[
    "/api/Vehicle/GetAllVehicles",
    "/api/Vehicle",
    "/api/vehicles",
    "/Vehicle/GetAllVehicles",
];

// ============================================================================
// Record Kinds
// ============================================================================

/// The four record families lubemon tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Odometer readings.
    Odometer,
    /// Maintenance plan entries.
    Plan,
    /// Tax payments.
    Tax,
    /// Service visits.
    Service,
}

impl RecordKind {
    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Odometer => "odometer",
            RecordKind::Plan => "plan",
            RecordKind::Tax => "tax",
            RecordKind::Service => "service",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Endpoint Table
// ============================================================================

/// The API paths of one server.
///
/// Defaults match current LubeLogger releases; the vehicles path may be
/// overridden by the capability probe at setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTable {
    /// Vehicles listing endpoint.
    pub vehicles: String,
    /// Odometer records endpoint.
    pub odometer: String,
    /// Plan records endpoint.
    pub plan: String,
    /// Tax records endpoint.
    pub tax: String,
    /// Service records endpoint.
    pub service: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            vehicles: "/api/vehicles".to_string(),
            odometer: "/api/vehicle/odometerrecords/all".to_string(),
            plan: "/api/vehicle/planrecords/all".to_string(),
            tax: "/api/vehicle/taxrecords/all".to_string(),
            service: "/api/vehicle/servicerecords/all".to_string(),
        }
    }
}

impl EndpointTable {
    /// Path serving records of the given kind.
    pub fn record_path(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Odometer => &self.odometer,
            RecordKind::Plan => &self.plan,
            RecordKind::Tax => &self.tax,
            RecordKind::Service => &self.service,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_paths() {
        let table = EndpointTable::default();
        assert_eq!(
            table.record_path(RecordKind::Odometer),
            "/api/vehicle/odometerrecords/all"
        );
        assert_eq!(table.record_path(RecordKind::Plan), "/api/vehicle/planrecords/all");
        assert_eq!(table.vehicles, "/api/vehicles");
    }

    #[test]
    fn test_record_kind_names() {
        assert_eq!(RecordKind::Odometer.to_string(), "odometer");
        assert_eq!(RecordKind::Service.as_str(), "service");
    }
}
