//! Fuel and battery level models

use serde::{Deserialize, Serialize};

/// Which energy subsystem a level request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyKind {
    Fuel,
    Battery,
}

impl EnergyKind {
    /// Name of the upstream `data` field carrying this level
    pub fn upstream_field(&self) -> &'static str {
        match self {
            EnergyKind::Fuel => "tankLevel",
            EnergyKind::Battery => "batteryLevel",
        }
    }
}

/// Remaining energy as a whole percentage
///
/// `percent` is `None` (serialized as `null`) when the vehicle has no such
/// subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyPercent {
    pub percent: Option<i64>,
}
