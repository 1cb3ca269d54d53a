//! Per-capability extraction rules
//!
//! Each rule takes an envelope that already passed [`classify`](super::classify)
//! and builds the client payload from the fields that capability consumes.
//! Fields the rule does not name are ignored.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::decode::{decode_boolean, decode_optional_number, decode_string};
use crate::error::{NormalizeError, NormalizeResult};
use crate::models::{
    DoorStatus, EnergyKind, EnergyPercent, EngineActionResult, EngineStatus,
    NormalizedVehicleInfo,
};
use crate::upstream::{UpstreamEnvelope, WrappedCollection, WrappedField};

/// Upstream action status meaning the command ran
const EXECUTED: &str = "EXECUTED";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VehicleInfoData {
    vin: WrappedField,
    color: WrappedField,
    four_door_sedan: WrappedField,
    drive_train: WrappedField,
}

#[derive(Deserialize)]
struct SecurityStatusData {
    doors: WrappedCollection<DoorEntry>,
}

#[derive(Deserialize)]
struct DoorEntry {
    location: WrappedField,
    locked: WrappedField,
}

/// Deserialize the envelope's `data` block into a capability-specific view
fn data_as<T: DeserializeOwned>(envelope: &UpstreamEnvelope) -> NormalizeResult<T> {
    let data = envelope
        .data
        .clone()
        .ok_or_else(|| NormalizeError::MalformedResponse("missing data".to_string()))?;
    serde_json::from_value(data)
        .map_err(|e| NormalizeError::MalformedResponse(format!("unexpected data: {}", e)))
}

/// Vehicle info: `doorCount` is 4 only for a four-door sedan
pub fn vehicle_info(envelope: &UpstreamEnvelope) -> NormalizeResult<NormalizedVehicleInfo> {
    let data: VehicleInfoData = data_as(envelope)?;

    Ok(NormalizedVehicleInfo {
        vin: decode_string("vin", &data.vin)?,
        color: decode_string("color", &data.color)?,
        door_count: if decode_boolean(&data.four_door_sedan) {
            4
        } else {
            2
        },
        drive_train: decode_string("driveTrain", &data.drive_train)?,
    })
}

/// Door status: one entry per upstream door, in upstream order
pub fn door_status(envelope: &UpstreamEnvelope) -> NormalizeResult<Vec<DoorStatus>> {
    let data: SecurityStatusData = data_as(envelope)?;

    data.doors
        .values
        .iter()
        .map(|door| -> NormalizeResult<DoorStatus> {
            Ok(DoorStatus {
                location: decode_string("location", &door.location)?,
                locked: decode_boolean(&door.locked),
            })
        })
        .collect()
}

/// Fuel or battery level
pub fn energy_percent(
    envelope: &UpstreamEnvelope,
    kind: EnergyKind,
) -> NormalizeResult<EnergyPercent> {
    let name = kind.upstream_field();
    let raw = envelope
        .data
        .as_ref()
        .and_then(|data| data.get(name))
        .ok_or_else(|| NormalizeError::MalformedResponse(format!("missing {}", name)))?;
    let field: WrappedField = serde_json::from_value(raw.clone())
        .map_err(|e| NormalizeError::MalformedResponse(format!("unexpected {}: {}", name, e)))?;

    Ok(EnergyPercent {
        percent: decode_optional_number(&field),
    })
}

/// Fuel level, for use where a single-argument rule is expected
pub fn fuel_percent(envelope: &UpstreamEnvelope) -> NormalizeResult<EnergyPercent> {
    energy_percent(envelope, EnergyKind::Fuel)
}

/// Battery level, for use where a single-argument rule is expected
pub fn battery_percent(envelope: &UpstreamEnvelope) -> NormalizeResult<EnergyPercent> {
    energy_percent(envelope, EnergyKind::Battery)
}

/// Engine action: anything other than `EXECUTED` is an error
pub fn engine_action_result(envelope: &UpstreamEnvelope) -> NormalizeResult<EngineActionResult> {
    let action_result = envelope
        .action_result
        .as_ref()
        .ok_or_else(|| NormalizeError::MalformedResponse("missing actionResult".to_string()))?;

    let status = match &action_result.status {
        Some(Value::String(s)) if s == EXECUTED => EngineStatus::Success,
        other => {
            tracing::debug!(status = ?other, "Engine action not executed");
            EngineStatus::Error
        }
    };

    Ok(EngineActionResult { status })
}
