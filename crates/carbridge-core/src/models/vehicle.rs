//! Vehicle info and door models

use serde::{Deserialize, Serialize};

/// Normalized vehicle description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedVehicleInfo {
    pub vin: String,
    pub color: String,
    /// Always 2 or 4
    pub door_count: u8,
    pub drive_train: String,
}

/// Lock state of a single door
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorStatus {
    /// Door location as reported upstream (e.g., "frontLeft")
    pub location: String,
    pub locked: bool,
}
