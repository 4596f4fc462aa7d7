//! The LubeLogger HTTP client.
//!
//! One `reqwest::Client` is built per configured server and reused for every
//! request, so connection pooling spans refresh cycles. Self-signed TLS
//! certificates are accepted; LubeLogger installs usually sit on a LAN
//! behind hand-rolled certs.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde_json::Value;
use tracing::{debug, error, instrument};

use lubemon_core::{records_from_value, select_latest, ConnectionConfig, Record};

use crate::api::{ApiCapability, VehicleDataApi};
use crate::endpoints::{EndpointTable, RecordKind};
use crate::error::{ClientError, ProbeError};

/// Total per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Client
// ============================================================================

/// Authenticated client for one LubeLogger server.
#[derive(Debug)]
pub struct LubeLoggerClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    endpoints: EndpointTable,
    /// Vehicles path discovered by the probe, overriding the table default.
    resolved_vehicles_path: OnceLock<String>,
}

impl LubeLoggerClient {
    /// Creates a client with the default endpoint table.
    ///
    /// # Errors
    ///
    /// Fails when the base URL does not parse or the underlying HTTP client
    /// cannot be built.
    pub fn new(config: &ConnectionConfig) -> Result<Self, ClientError> {
        Self::with_endpoints(config, EndpointTable::default())
    }

    /// Creates a client with an explicit endpoint table.
    pub fn with_endpoints(
        config: &ConnectionConfig,
        endpoints: EndpointTable,
    ) -> Result<Self, ClientError> {
        url::Url::parse(&config.base_url)
            .map_err(|err| ClientError::InvalidUrl(format!("{}: {err}", config.base_url)))?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .user_agent(concat!("lubemon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            endpoints,
            resolved_vehicles_path: OnceLock::new(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The vehicles path in effect: the probe result wins over the table.
    pub fn vehicles_path(&self) -> &str {
        self.resolved_vehicles_path
            .get()
            .map_or(self.endpoints.vehicles.as_str(), String::as_str)
    }

    pub(crate) fn remember_vehicles_path(&self, path: &str) {
        let _ = self.resolved_vehicles_path.set(path.to_string());
    }

    pub(crate) fn record_path(&self, kind: RecordKind) -> &str {
        self.endpoints.record_path(kind)
    }

    /// Performs one authenticated GET and classifies the response.
    pub(crate) async fn get(&self, path_and_query: &str) -> Result<Payload, ClientError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!(url = %url, "GET");
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|err| {
                error!(url = %url, error = %err, "Error communicating with LubeLogger");
                err
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url = %url, "Endpoint not found");
            return Ok(Payload::Missing);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized { url });
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }

        if is_json(response.headers().get(header::CONTENT_TYPE)) {
            Ok(Payload::Json(response.json().await?))
        } else {
            Ok(Payload::Text(response.text().await?))
        }
    }

    /// Fetches all records of one kind, optionally scoped to a vehicle.
    ///
    /// The vehicle id is passed as a query parameter and enforced again by a
    /// post-filter: records not tagged with the requested vehicle are
    /// dropped even when the server ignored the parameter.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn records(
        &self,
        kind: RecordKind,
        vehicle_id: Option<i64>,
    ) -> Result<Vec<Record>, ClientError> {
        let path = self.record_path(kind);
        let payload = match vehicle_id {
            Some(id) => self.get(&format!("{path}?vehicleId={id}")).await?,
            None => self.get(path).await?,
        };
        let mut records = payload.into_records();
        if let Some(id) = vehicle_id {
            records.retain(|record| record.vehicle_ref() == Some(id));
        }
        Ok(records)
    }
}

/// Checks whether a response declared a JSON body.
fn is_json(content_type: Option<&header::HeaderValue>) -> bool {
    content_type
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"))
}

// ============================================================================
// Payload
// ============================================================================

/// What a GET produced, after status triage.
#[derive(Debug)]
pub(crate) enum Payload {
    /// Body decoded as JSON (the server declared `application/json`).
    Json(Value),
    /// Body served under some other content type.
    Text(String),
    /// The endpoint does not exist on this server (404).
    Missing,
}

impl Payload {
    /// Record list carried by this payload; non-JSON payloads carry none.
    pub(crate) fn into_records(self) -> Vec<Record> {
        match self {
            Payload::Json(body) => records_from_value(body),
            Payload::Text(_) | Payload::Missing => Vec::new(),
        }
    }
}

// ============================================================================
// VehicleDataApi
// ============================================================================

#[async_trait]
impl VehicleDataApi for LubeLoggerClient {
    async fn resolve_capability(&self) -> Result<ApiCapability, ProbeError> {
        Ok(self.probe().await?.capability)
    }

    async fn vehicles(&self) -> Result<Vec<Record>, ClientError> {
        let payload = self.get(self.vehicles_path()).await?;
        Ok(payload.into_records())
    }

    async fn latest_odometer(
        &self,
        vehicle_id: Option<i64>,
    ) -> Result<Option<Record>, ClientError> {
        Ok(select_latest(
            self.records(RecordKind::Odometer, vehicle_id).await?,
        ))
    }

    async fn next_plan(&self, vehicle_id: Option<i64>) -> Result<Option<Record>, ClientError> {
        // Plan records arrive soonest-first, so the first one is the
        // upcoming entry; no sort-key pass here.
        Ok(self
            .records(RecordKind::Plan, vehicle_id)
            .await?
            .into_iter()
            .next())
    }

    async fn latest_tax(&self, vehicle_id: Option<i64>) -> Result<Option<Record>, ClientError> {
        Ok(select_latest(
            self.records(RecordKind::Tax, vehicle_id).await?,
        ))
    }

    async fn latest_service(
        &self,
        vehicle_id: Option<i64>,
    ) -> Result<Option<Record>, ClientError> {
        Ok(select_latest(
            self.records(RecordKind::Service, vehicle_id).await?,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lubemon_core::ConnectionConfig;

    fn config(base_url: &str) -> ConnectionConfig {
        ConnectionConfig::new(base_url, "user", "secret").unwrap()
    }

    #[test]
    fn test_is_json_content_types() {
        let json = header::HeaderValue::from_static("application/json");
        let json_utf8 = header::HeaderValue::from_static("application/json; charset=utf-8");
        let html = header::HeaderValue::from_static("text/html");
        assert!(is_json(Some(&json)));
        assert!(is_json(Some(&json_utf8)));
        assert!(!is_json(Some(&html)));
        assert!(!is_json(None));
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let mut bad = config("http://lube.local");
        bad.base_url = "http://".to_string();
        assert!(matches!(
            LubeLoggerClient::new(&bad),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_vehicles_path_override() {
        let client = LubeLoggerClient::new(&config("http://lube.local")).unwrap();
        assert_eq!(client.vehicles_path(), "/api/vehicles");
        client.remember_vehicles_path("/api/Vehicle");
        assert_eq!(client.vehicles_path(), "/api/Vehicle");
        // First resolution sticks.
        client.remember_vehicles_path("/elsewhere");
        assert_eq!(client.vehicles_path(), "/api/Vehicle");
    }
}
