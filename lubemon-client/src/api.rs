//! The data-access seam between client and coordinator.

use async_trait::async_trait;
use lubemon_core::{ApiMode, Record};

use crate::error::{ClientError, ProbeError};

/// Which fetch layout a server supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCapability {
    /// A vehicles endpoint exists; fetches are scoped per vehicle.
    PerVehicle,
    /// No vehicles endpoint; fields are fetched instance-wide.
    Flat,
}

impl From<ApiCapability> for ApiMode {
    fn from(capability: ApiCapability) -> Self {
        match capability {
            ApiCapability::PerVehicle => ApiMode::PerVehicle,
            ApiCapability::Flat => ApiMode::Flat,
        }
    }
}

/// Data access used by the update coordinator.
///
/// [`LubeLoggerClient`](crate::LubeLoggerClient) is the production
/// implementation; coordinator tests substitute scripted doubles.
#[async_trait]
pub trait VehicleDataApi: Send + Sync {
    /// Determines the fetch layout the server supports.
    ///
    /// The default assumes per-vehicle, which every recent LubeLogger
    /// release provides; the real client probes instead.
    async fn resolve_capability(&self) -> Result<ApiCapability, ProbeError> {
        Ok(ApiCapability::PerVehicle)
    }

    /// Lists all vehicles. Servers without the endpoint yield an empty list.
    async fn vehicles(&self) -> Result<Vec<Record>, ClientError>;

    /// Latest odometer record by sort key.
    async fn latest_odometer(&self, vehicle_id: Option<i64>)
        -> Result<Option<Record>, ClientError>;

    /// Upcoming plan record, in server order.
    async fn next_plan(&self, vehicle_id: Option<i64>) -> Result<Option<Record>, ClientError>;

    /// Latest tax record by sort key.
    async fn latest_tax(&self, vehicle_id: Option<i64>) -> Result<Option<Record>, ClientError>;

    /// Latest service record by sort key.
    async fn latest_service(&self, vehicle_id: Option<i64>) -> Result<Option<Record>, ClientError>;
}
