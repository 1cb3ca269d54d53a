//! Fake vendor API
//!
//! Reproduces the vendor's response shapes for a small fixed fleet:
//!
//! | id     | vehicle                                   |
//! |--------|-------------------------------------------|
//! | `1234` | four-door gas sedan, engine commands run  |
//! | `1235` | two-door electric coupe, engine commands fail |
//! | `503`  | HTTP 503 with a misleading domain body    |
//! | other  | domain 404 `Vehicle id: <id> not found.`  |
//!
//! Unknown service paths answer like the real vendor: HTTP 200 carrying a
//! domain 404 with reason `Service not found.`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

pub const GAS_SEDAN_ID: &str = "1234";
pub const ELECTRIC_COUPE_ID: &str = "1235";
pub const UNAVAILABLE_ID: &str = "503";

/// Request body the vendor accepts
#[derive(Debug, Deserialize)]
pub struct VendorRequest {
    pub id: String,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default, rename = "responseType")]
    pub response_type: Option<String>,
}

/// Router serving the four vendor services
pub fn router() -> Router {
    Router::new()
        .route("/getVehicleInfoService", post(vehicle_info))
        .route("/getSecurityStatusService", post(security_status))
        .route("/getEnergyService", post(energy))
        .route("/actionEngineService", post(action_engine))
        .fallback(service_not_found)
}

fn string_field(value: &str) -> Value {
    json!({"type": "String", "value": value})
}

fn bool_field(value: bool) -> Value {
    json!({"type": "Boolean", "value": if value { "True" } else { "False" }})
}

fn door(location: &str, locked: bool) -> Value {
    json!({"location": string_field(location), "locked": bool_field(locked)})
}

/// Shared handling of ids that are not a known vehicle
fn unknown_vehicle(id: &str) -> Response {
    if id == UNAVAILABLE_ID {
        let body = json!({"status": "404", "reason": "Vehicle id: 503 not found."});
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    }
    Json(json!({
        "status": "404",
        "reason": format!("Vehicle id: {} not found.", id)
    }))
    .into_response()
}

async fn vehicle_info(Json(req): Json<VendorRequest>) -> Response {
    let (vin, color, four_door, drive_train) = match req.id.as_str() {
        GAS_SEDAN_ID => ("123123412412", "Metallic Silver", true, "v8"),
        ELECTRIC_COUPE_ID => ("1235AZ91XP", "Forest Green", false, "electric"),
        other => return unknown_vehicle(other),
    };

    Json(json!({
        "service": "getVehicleInfo",
        "status": "200",
        "data": {
            "vin": string_field(vin),
            "color": string_field(color),
            "fourDoorSedan": bool_field(four_door),
            "twoDoorCoupe": bool_field(!four_door),
            "driveTrain": string_field(drive_train)
        }
    }))
    .into_response()
}

async fn security_status(Json(req): Json<VendorRequest>) -> Response {
    let doors = match req.id.as_str() {
        GAS_SEDAN_ID => vec![
            door("frontLeft", false),
            door("frontRight", true),
            door("backLeft", false),
            door("backRight", true),
        ],
        ELECTRIC_COUPE_ID => vec![door("frontLeft", false), door("frontRight", false)],
        other => return unknown_vehicle(other),
    };

    Json(json!({
        "service": "getSecurityStatus",
        "status": "200",
        "data": {"doors": {"type": "Array", "values": doors}}
    }))
    .into_response()
}

async fn energy(Json(req): Json<VendorRequest>) -> Response {
    let null_field = json!({"type": "Null", "value": "null"});
    let (tank, battery) = match req.id.as_str() {
        GAS_SEDAN_ID => (json!({"type": "Number", "value": "30.2"}), null_field),
        ELECTRIC_COUPE_ID => (null_field, json!({"type": "Number", "value": "73.5"})),
        other => return unknown_vehicle(other),
    };

    Json(json!({
        "service": "getEnergy",
        "status": "200",
        "data": {"tankLevel": tank, "batteryLevel": battery}
    }))
    .into_response()
}

async fn action_engine(Json(req): Json<VendorRequest>) -> Response {
    let status = match (req.id.as_str(), req.command.as_deref()) {
        (GAS_SEDAN_ID, Some("START_VEHICLE" | "STOP_VEHICLE")) => "EXECUTED",
        (GAS_SEDAN_ID | ELECTRIC_COUPE_ID, _) => "FAILED",
        (other, _) => return unknown_vehicle(other),
    };

    Json(json!({
        "service": "actionEngine",
        "status": "200",
        "actionResult": {"status": status}
    }))
    .into_response()
}

async fn service_not_found() -> Response {
    Json(json!({"status": "404", "reason": "Service not found."})).into_response()
}
