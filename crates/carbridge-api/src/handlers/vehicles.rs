//! Vehicle handlers
//!
//! Each handler makes exactly one upstream call and normalizes the reply with
//! the matching extraction rule.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use carbridge_core::normalize::{extract, normalize};
use carbridge_core::{
    DoorStatus, EnergyPercent, EngineActionRequest, EngineActionResult, NormalizeResult,
    NormalizedVehicleInfo, RemoteOperation, TransportResult, UpstreamEnvelope, UpstreamRequest,
};

use crate::error::ApiError;
use crate::state::AppState;

async fn call_upstream(state: &AppState, request: UpstreamRequest) -> TransportResult {
    state.upstream().call(&request).await
}

/// GET /vehicles/{id}
/// Vehicle description: vin, color, door count and drive train
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<NormalizedVehicleInfo>, ApiError> {
    let request = UpstreamRequest::new(RemoteOperation::VehicleInfo, vehicle_id);
    let outcome = call_upstream(&state, request).await;

    Ok(Json(normalize(outcome, extract::vehicle_info)?))
}

/// GET /vehicles/{id}/doors
/// Lock state of every door, in the order the vendor reports them
pub async fn get_doors(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<Vec<DoorStatus>>, ApiError> {
    let request = UpstreamRequest::new(RemoteOperation::SecurityStatus, vehicle_id);
    let outcome = call_upstream(&state, request).await;

    Ok(Json(normalize(outcome, extract::door_status)?))
}

/// GET /vehicles/{id}/fuel
pub async fn get_fuel(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<EnergyPercent>, ApiError> {
    read_energy(&state, vehicle_id, extract::fuel_percent).await
}

/// GET /vehicles/{id}/battery
pub async fn get_battery(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<EnergyPercent>, ApiError> {
    read_energy(&state, vehicle_id, extract::battery_percent).await
}

async fn read_energy(
    state: &AppState,
    vehicle_id: String,
    rule: fn(&UpstreamEnvelope) -> NormalizeResult<EnergyPercent>,
) -> Result<Json<EnergyPercent>, ApiError> {
    // Fuel and battery share one vendor service
    let request = UpstreamRequest::new(RemoteOperation::Energy, vehicle_id);
    let outcome = call_upstream(state, request).await;

    Ok(Json(normalize(outcome, rule)?))
}

/// POST /vehicles/{id}/engine
/// Start or stop the engine
///
/// Body: `{"action": "START" | "STOP"}`. The body is validated before any
/// upstream call; an invalid or missing action is a 400. Bodies not sent as
/// JSON are ignored.
pub async fn engine_action(
    State(state): State<AppState>,
    Path(vehicle_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<EngineActionResult>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let action = EngineActionRequest::from_body(content_type, &body).action()?;

    tracing::info!(vehicle_id = %vehicle_id, ?action, "Engine action requested");

    let request = UpstreamRequest::new(RemoteOperation::EngineAction, vehicle_id)
        .with_command(action.command());
    let outcome = call_upstream(&state, request).await;

    Ok(Json(normalize(outcome, extract::engine_action_result)?))
}
