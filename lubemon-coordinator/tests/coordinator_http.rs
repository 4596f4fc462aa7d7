//! End-to-end coordinator tests over the real wire path.
//!
//! These run the coordinator against the stub server from lubemon-client,
//! so probing, fetching, filtering, and assembly are all exercised together.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use lubemon_client::testing::StubServer;
use lubemon_coordinator::{SetupError, UpdateCoordinator};
use lubemon_core::ApiMode;

/// A realistic two-vehicle server: vehicles endpoint on the modern path,
/// records tagged by `VehicleId`, tax endpoint broken.
fn two_vehicle_router() -> Router {
    Router::new()
        .route(
            "/api/vehicles",
            get(|| async {
                Json(json!([
                    {"Id": 1, "Name": "Car"},
                    {"Id": 2, "Name": "Van"},
                ]))
            }),
        )
        .route(
            "/api/vehicle/odometerrecords/all",
            get(|| async {
                Json(json!([
                    {"Id": 10, "VehicleId": 1, "Odometer": "100"},
                    {"Id": 12, "VehicleId": 1, "Odometer": "140"},
                    {"Id": 11, "VehicleId": 2, "Odometer": "200"},
                ]))
            }),
        )
        .route(
            "/api/vehicle/planrecords/all",
            get(|| async {
                Json(json!([
                    {"Id": 20, "VehicleId": 1, "NextDueDate": "2025-03-01"},
                ]))
            }),
        )
        .route(
            "/api/vehicle/taxrecords/all",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "tax db down") }),
        )
        .route(
            "/api/vehicle/servicerecords/all",
            get(|| async {
                Json(json!([
                    {"Id": 30, "VehicleId": 1, "Date": "2024-11-20"},
                    {"Id": 31, "VehicleId": 2, "Date": "2024-12-01T08:30:00Z"},
                ]))
            }),
        )
}

#[tokio::test]
async fn test_full_cycle_against_stub_server() {
    let server = StubServer::start(two_vehicle_router()).await.unwrap();
    let coordinator = UpdateCoordinator::new(&server.config()).unwrap();

    let snapshot = coordinator.first_refresh().await.unwrap();

    // Auto mode probed its way to the per-vehicle layout.
    assert_eq!(coordinator.mode(), ApiMode::PerVehicle);

    let car = snapshot.vehicle(1).unwrap();
    assert_eq!(car.name, "Car");
    assert_eq!(car.fields.odometer_value(), Some(140.0));
    assert_eq!(
        car.fields.plan_due_date().map(|d| d.to_rfc3339()),
        Some("2025-03-01T00:00:00+00:00".to_string())
    );
    assert!(car.fields.latest_tax.is_none(), "broken endpoint degrades");
    assert_eq!(
        car.fields.service_date().map(|d| d.to_rfc3339()),
        Some("2024-11-20T00:00:00+00:00".to_string())
    );

    let van = snapshot.vehicle(2).unwrap();
    assert_eq!(van.fields.odometer_value(), Some(200.0));
    assert!(van.fields.next_plan.is_none(), "no plan records for the van");
    assert_eq!(
        van.fields.service_date().map(|d| d.to_rfc3339()),
        Some("2024-12-01T08:30:00+00:00".to_string())
    );
}

#[tokio::test]
async fn test_flat_server_resolves_and_fetches() {
    // No vehicles endpoint at all; only instance-wide records.
    let router = Router::new().route(
        "/api/vehicle/odometerrecords/all",
        get(|| async { Json(json!([{"Id": 1, "Odometer": 55_000}])) }),
    );
    let server = StubServer::start(router).await.unwrap();
    let coordinator = UpdateCoordinator::new(&server.config()).unwrap();

    let snapshot = coordinator.first_refresh().await.unwrap();
    assert_eq!(coordinator.mode(), ApiMode::Flat);
    let fields = snapshot.flat_fields().unwrap();
    assert_eq!(fields.odometer_value(), Some(55_000.0));
    assert!(fields.latest_service.is_none());
}

#[tokio::test]
async fn test_bad_credentials_fail_setup() {
    let router = Router::new().fallback(|| async { StatusCode::UNAUTHORIZED });
    let server = StubServer::start(router).await.unwrap();
    let coordinator = UpdateCoordinator::new(&server.config()).unwrap();

    assert!(matches!(
        coordinator.first_refresh().await,
        Err(SetupError::Probe(_))
    ));
    assert!(coordinator.current_snapshot().is_none());
}

#[tokio::test]
async fn test_vehicles_endpoint_breaking_mid_flight() {
    // Probe succeeds (vehicles endpoint exists), but the endpoint starts
    // erroring afterwards: later cycles publish empty snapshots.
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/api/vehicles",
        get(move || {
            let counter = counter.clone();
            async move {
                use axum::response::IntoResponse;
                if counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                    Json(json!([{"Id": 1, "Name": "Car"}])).into_response()
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "gone").into_response()
                }
            }
        }),
    );
    let server = StubServer::start(router).await.unwrap();
    let coordinator = UpdateCoordinator::new(&server.config()).unwrap();

    // Call 0 answers the probe, so the first cycle already sees the error
    // and publishes an empty vehicle list rather than failing.
    let snapshot = coordinator.first_refresh().await.unwrap();
    assert_eq!(coordinator.mode(), ApiMode::PerVehicle);
    assert!(snapshot.vehicles().is_empty());
    assert!(coordinator.current_snapshot().is_some());
}
