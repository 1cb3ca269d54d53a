//! API tests against a scripted upstream
//!
//! The mock backend returns a fixed transport outcome and records every
//! request it receives, so each test can assert both the client-facing
//! response and what (if anything) was sent upstream.

use std::sync::Arc;

use async_trait::async_trait;
use carbridge_api::{create_router, AppState};
use carbridge_client::testing::TestServer;
use carbridge_core::{
    EngineCommand, RemoteOperation, TransportError, TransportResult, UpstreamBackend,
    UpstreamReply, UpstreamRequest,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// =============================================================================
// Mock Upstream
// =============================================================================

/// Upstream that answers every call with the same outcome
struct MockUpstream {
    outcome: TransportResult,
    calls: Mutex<Vec<UpstreamRequest>>,
}

impl MockUpstream {
    fn replying(outcome: TransportResult) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn json(body: Value) -> Arc<Self> {
        Self::replying(Ok(UpstreamReply::ok_json(&body)))
    }

    fn calls(&self) -> Vec<UpstreamRequest> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl UpstreamBackend for MockUpstream {
    async fn call(&self, request: &UpstreamRequest) -> TransportResult {
        self.calls.lock().push(request.clone());
        self.outcome.clone()
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

async fn create_test_server(upstream: Arc<MockUpstream>) -> TestServer {
    let state = AppState::new(upstream);
    TestServer::start(create_router(state))
        .await
        .expect("Failed to start test server")
}

async fn get(server: &TestServer, path: &str) -> (u16, Value) {
    let response = reqwest::get(server.url(path)).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn post_engine(server: &TestServer, id: &str, body: &str) -> (u16, Value) {
    post_engine_as(server, id, Some("application/json"), body).await
}

async fn post_engine_as(
    server: &TestServer,
    id: &str,
    content_type: Option<&str>,
    body: &str,
) -> (u16, Value) {
    let mut request = reqwest::Client::new()
        .post(server.url(&format!("/vehicles/{}/engine", id)))
        .body(body.to_string());
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let response = request.send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn send(server: &TestServer, method: reqwest::Method, path: &str) -> (u16, Value) {
    let response = reqwest::Client::new()
        .request(method, server.url(path))
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

fn vehicle_not_found() -> Value {
    json!({"status": "404", "reason": "Vehicle id: 1236 not found."})
}

// =============================================================================
// Health / fallback
// =============================================================================

#[tokio::test]
async fn test_ping() {
    let upstream = MockUpstream::json(json!({}));
    let server = create_test_server(upstream.clone()).await;

    let (status, body) = get(&server, "/ping").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"success": true}));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_unmatched_route() {
    let upstream = MockUpstream::json(json!({}));
    let server = create_test_server(upstream).await;

    let (status, body) = get(&server, "/trucks/1234").await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({"status": 404, "message": "Not Found"}));
}

#[tokio::test]
async fn test_wrong_method_on_known_path() {
    let upstream = MockUpstream::json(json!({}));
    let server = create_test_server(upstream.clone()).await;

    for (method, path) in [
        (reqwest::Method::GET, "/vehicles/1234/engine"),
        (reqwest::Method::POST, "/vehicles/1234"),
        (reqwest::Method::DELETE, "/ping"),
    ] {
        let (status, body) = send(&server, method.clone(), path).await;
        assert_eq!(status, 404, "{} {}", method, path);
        assert_eq!(body, json!({"status": 404, "message": "Not Found"}));
    }
    assert!(upstream.calls().is_empty());
}

// =============================================================================
// Vehicle info
// =============================================================================

#[tokio::test]
async fn test_vehicle_info() {
    let upstream = MockUpstream::json(json!({
        "service": "getVehicleInfo",
        "status": "200",
        "data": {
            "vin": {"type": "String", "value": "123123412412"},
            "color": {"type": "String", "value": "Metallic Silver"},
            "fourDoorSedan": {"type": "Boolean", "value": "True"},
            "twoDoorCoupe": {"type": "Boolean", "value": "False"},
            "driveTrain": {"type": "String", "value": "v8"}
        }
    }));
    let server = create_test_server(upstream.clone()).await;

    let (status, body) = get(&server, "/vehicles/1234").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "vin": "123123412412",
            "color": "Metallic Silver",
            "doorCount": 4,
            "driveTrain": "v8"
        })
    );

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].operation, RemoteOperation::VehicleInfo);
    assert_eq!(calls[0].id, "1234");
    assert_eq!(calls[0].command, None);
}

#[tokio::test]
async fn test_vehicle_not_found() {
    let upstream = MockUpstream::json(vehicle_not_found());
    let server = create_test_server(upstream).await;

    let (status, body) = get(&server, "/vehicles/1236").await;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!({"status": 404, "message": "Vehicle id: 1236 not found."})
    );
}

// =============================================================================
// Error classification applies to every endpoint
// =============================================================================

#[tokio::test]
async fn test_service_not_found_is_500_everywhere() {
    let upstream = MockUpstream::json(json!({"status": "404", "reason": "Service not found."}));
    let server = create_test_server(upstream).await;

    for path in [
        "/vehicles/1234",
        "/vehicles/1234/doors",
        "/vehicles/1234/fuel",
        "/vehicles/1234/battery",
    ] {
        let (status, body) = get(&server, path).await;
        assert_eq!(status, 500, "{}", path);
        assert_eq!(
            body,
            json!({"status": 500, "message": "Internal error occurred"})
        );
    }

    let (status, body) = post_engine(&server, "1234", r#"{"action":"START"}"#).await;
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Internal error occurred");
}

#[tokio::test]
async fn test_transport_error_is_500() {
    let upstream = MockUpstream::replying(Err(TransportError::Connection(
        "connection refused".to_string(),
    )));
    let server = create_test_server(upstream).await;

    let (status, body) = get(&server, "/vehicles/1234/doors").await;
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({"status": 500, "message": "Unknown error occurred"})
    );
}

#[tokio::test]
async fn test_non_200_transport_ignores_body() {
    let upstream = MockUpstream::replying(Ok(UpstreamReply::new(
        502,
        vehicle_not_found().to_string(),
    )));
    let server = create_test_server(upstream).await;

    let (status, body) = get(&server, "/vehicles/1236/fuel").await;
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Unknown error occurred");
}

#[tokio::test]
async fn test_other_domain_status_passthrough() {
    let upstream = MockUpstream::json(json!({"status": 403, "reason": "Vehicle locked out."}));
    let server = create_test_server(upstream).await;

    let (status, body) = get(&server, "/vehicles/1234/battery").await;
    assert_eq!(status, 403);
    assert_eq!(body, json!({"status": 403, "message": "Vehicle locked out."}));
}

// =============================================================================
// Doors
// =============================================================================

#[tokio::test]
async fn test_doors() {
    let upstream = MockUpstream::json(json!({
        "service": "getSecurityStatus",
        "status": "200",
        "data": {"doors": {"type": "Array", "values": [
            {"location": {"type": "String", "value": "frontRight"}, "locked": {"type": "Boolean", "value": "True"}},
            {"location": {"type": "String", "value": "frontLeft"}, "locked": {"type": "Boolean", "value": "true"}}
        ]}}
    }));
    let server = create_test_server(upstream.clone()).await;

    let (status, body) = get(&server, "/vehicles/1234/doors").await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([
            {"location": "frontRight", "locked": true},
            {"location": "frontLeft", "locked": false}
        ])
    );
    assert_eq!(upstream.calls()[0].operation, RemoteOperation::SecurityStatus);
}

// =============================================================================
// Energy
// =============================================================================

#[tokio::test]
async fn test_fuel_and_battery_share_energy_service() {
    let upstream = MockUpstream::json(json!({
        "service": "getEnergy",
        "status": "200",
        "data": {
            "tankLevel": {"type": "Number", "value": "30.2"},
            "batteryLevel": {"type": "Null", "value": "null"}
        }
    }));
    let server = create_test_server(upstream.clone()).await;

    let (status, body) = get(&server, "/vehicles/1234/fuel").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"percent": 30}));

    let (status, body) = get(&server, "/vehicles/1234/battery").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"percent": null}));

    let calls = upstream.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.operation == RemoteOperation::Energy));
}

// =============================================================================
// Engine
// =============================================================================

#[tokio::test]
async fn test_engine_invalid_action_skips_upstream() {
    let upstream = MockUpstream::json(json!({"status": "200", "actionResult": {"status": "EXECUTED"}}));
    let server = create_test_server(upstream.clone()).await;

    let (status, body) = post_engine(&server, "1234", r#"{"action":"BLAH"}"#).await;
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({"status": 400, "message": "Engine can only START or STOP. BLAH is invalid"})
    );

    let (status, body) = post_engine(&server, "1234", "{}").await;
    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        "Engine can only START or STOP. undefined is invalid"
    );

    let (status, _) = post_engine(&server, "1234", r#"{"action":"start"}"#).await;
    assert_eq!(status, 400);

    let (status, _) = post_engine(&server, "1234", "").await;
    assert_eq!(status, 400);

    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_engine_ignores_non_json_body() {
    let upstream = MockUpstream::json(json!({"status": "200", "actionResult": {"status": "EXECUTED"}}));
    let server = create_test_server(upstream.clone()).await;

    for content_type in [Some("text/plain"), None] {
        let (status, body) =
            post_engine_as(&server, "1234", content_type, r#"{"action":"START"}"#).await;
        assert_eq!(status, 400, "{:?}", content_type);
        assert_eq!(
            body,
            json!({"status": 400, "message": "Engine can only START or STOP. undefined is invalid"})
        );
    }

    let (status, _) = post_engine_as(
        &server,
        "1234",
        Some("application/json; charset=utf-8"),
        r#"{"action":"START"}"#,
    )
    .await;
    assert_eq!(status, 200);

    assert_eq!(upstream.calls().len(), 1);
}

#[tokio::test]
async fn test_engine_start_and_stop_commands() {
    let upstream = MockUpstream::json(json!({
        "service": "actionEngine",
        "status": "200",
        "actionResult": {"status": "EXECUTED"}
    }));
    let server = create_test_server(upstream.clone()).await;

    let (status, body) = post_engine(&server, "1234", r#"{"action":"START"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "success"}));

    let (status, _) = post_engine(&server, "1234", r#"{"action":"STOP"}"#).await;
    assert_eq!(status, 200);

    let calls = upstream.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].operation, RemoteOperation::EngineAction);
    assert_eq!(calls[0].command, Some(EngineCommand::StartVehicle));
    assert_eq!(calls[1].command, Some(EngineCommand::StopVehicle));
}

#[tokio::test]
async fn test_engine_failed_maps_to_error() {
    let upstream = MockUpstream::json(json!({
        "service": "actionEngine",
        "status": "200",
        "actionResult": {"status": "FAILED"}
    }));
    let server = create_test_server(upstream).await;

    let (status, body) = post_engine(&server, "1234", r#"{"action":"START"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "error"}));
}
