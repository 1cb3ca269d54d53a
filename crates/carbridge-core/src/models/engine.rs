//! Engine start/stop models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NormalizeError, NormalizeResult};

/// Client-requested engine action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineAction {
    Start,
    Stop,
}

impl EngineAction {
    /// Validate the `action` field of a client request body.
    ///
    /// Only the exact strings `"START"` and `"STOP"` are accepted. Anything
    /// else, including a missing field, is rejected with the offending value
    /// rendered into the message (`undefined` when absent).
    pub fn parse(action: Option<&Value>) -> NormalizeResult<Self> {
        match action {
            Some(Value::String(s)) if s == "START" => Ok(EngineAction::Start),
            Some(Value::String(s)) if s == "STOP" => Ok(EngineAction::Stop),
            other => Err(NormalizeError::InvalidEngineAction(render_action(other))),
        }
    }

    /// The vendor command this action maps to
    pub fn command(self) -> EngineCommand {
        match self {
            EngineAction::Start => EngineCommand::StartVehicle,
            EngineAction::Stop => EngineCommand::StopVehicle,
        }
    }
}

fn render_action(action: Option<&Value>) -> String {
    match action {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Command sent to the vendor's engine service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineCommand {
    StartVehicle,
    StopVehicle,
}

/// Outcome of an engine action as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Success,
    Error,
}

/// Engine action response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineActionResult {
    pub status: EngineStatus,
}

/// Client request body for `POST /vehicles/{id}/engine`
///
/// `action` is kept loosely typed so that invalid values can be echoed back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineActionRequest {
    #[serde(default)]
    pub action: Option<Value>,
}

impl EngineActionRequest {
    /// Parse a raw request body. Bodies that are not a JSON object are
    /// treated as empty.
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Parse a request body only when its `Content-Type` is JSON; any other
    /// (or missing) content type yields an empty request.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Self {
        match content_type {
            Some(ct) if is_json_content_type(ct) => Self::from_slice(body),
            _ => Self::default(),
        }
    }

    /// Validate and convert into an [`EngineAction`]
    pub fn action(&self) -> NormalizeResult<EngineAction> {
        EngineAction::parse(self.action.as_ref())
    }
}

/// `application/json`, case-insensitive, parameters ignored
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
