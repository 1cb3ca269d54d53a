//! Vendor-side request and response model
//!
//! The vendor wraps every scalar in `{ "type": ..., "value": ... }`, encodes
//! booleans as the strings `"True"`/`"False"` and reports its own domain
//! status in the body, independently of the HTTP status line. The types here
//! keep that shape loose on purpose; the `normalize` module is the only place
//! that interprets it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::EngineCommand;

/// Fixed value of the `responseType` request field
pub const RESPONSE_TYPE_JSON: &str = "JSON";

// =============================================================================
// Requests
// =============================================================================

/// The vendor operations this adapter calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    VehicleInfo,
    SecurityStatus,
    Energy,
    EngineAction,
}

impl RemoteOperation {
    /// Path segment of the vendor service, relative to the base address
    pub fn service_name(&self) -> &'static str {
        match self {
            RemoteOperation::VehicleInfo => "getVehicleInfoService",
            RemoteOperation::SecurityStatus => "getSecurityStatusService",
            RemoteOperation::Energy => "getEnergyService",
            RemoteOperation::EngineAction => "actionEngineService",
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// One outbound call: the operation plus the JSON body sent with it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamRequest {
    #[serde(skip)]
    pub operation: RemoteOperation,
    /// Opaque vehicle identifier, passed through untouched
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<EngineCommand>,
    #[serde(rename = "responseType")]
    pub response_type: &'static str,
}

impl UpstreamRequest {
    pub fn new(operation: RemoteOperation, vehicle_id: impl Into<String>) -> Self {
        Self {
            operation,
            id: vehicle_id.into(),
            command: None,
            response_type: RESPONSE_TYPE_JSON,
        }
    }

    /// Attach an engine command (only meaningful for [`RemoteOperation::EngineAction`])
    pub fn with_command(mut self, command: EngineCommand) -> Self {
        self.command = Some(command);
        self
    }
}

// =============================================================================
// Transport outcome
// =============================================================================

/// Failure to obtain any reply from the vendor
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("failed to read response: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

/// Raw reply: HTTP status line plus the unparsed body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 reply carrying the given JSON document
    pub fn ok_json(body: &Value) -> Self {
        Self::new(200, body.to_string())
    }
}

/// What a single upstream call delivers to the normalizer
pub type TransportResult = Result<UpstreamReply, TransportError>;

// =============================================================================
// Response envelope
// =============================================================================

/// Top-level vendor response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamEnvelope {
    /// Domain status; the vendor sends either a number or a numeric string
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub reason: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, rename = "actionResult")]
    pub action_result: Option<ActionResult>,
}

impl UpstreamEnvelope {
    /// Domain status as an integer, accepting `200`, `200.0` and `"200"` alike
    pub fn domain_status(&self) -> Option<i64> {
        match self.status.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Vendor reason text; non-string reasons are rendered as JSON
    pub fn reason_text(&self) -> Option<String> {
        match self.reason.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// `actionResult` block of an engine reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub status: Option<Value>,
}

/// A single `{type, value}` wrapped scalar
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WrappedField {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `Null` when the vendor omitted the value
    #[serde(default)]
    pub value: Value,
}

/// A `{type: "Array", values: [...]}` wrapped collection
#[derive(Debug, Clone, Deserialize)]
pub struct WrappedCollection<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}
