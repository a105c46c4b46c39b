//! Integration tests for the HTTP API

use std::io::Write;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use lead_pulse_config::{RegistryConfig, RegistryManager, Settings};
use lead_pulse_server::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(Settings::default(), RegistryManager::new()).unwrap();
    create_router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_lead(app: &Router, text: &str, location: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/signals",
        Some(json!({
            "text": text,
            "company_name": "SteelFlow Ltd",
            "location": location,
            "latitude": 22.57,
            "longitude": 88.36,
            "source_trust": 92,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["lead"].clone()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_registry() {
    let (status, body) = send(&app(), "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], 6);
    assert_eq!(body["facilities"], 5);
}

#[tokio::test]
async fn test_ingest_creates_lead() {
    let app = app();
    let lead = create_lead(&app, "Installing 3 high-capacity furnaces", "Kolkata, WB").await;

    assert_eq!(lead["recommended_product"], "Furnace Oil (FO)");
    assert_eq!(lead["normalized_company"], "Steelflow");
    assert_eq!(lead["status"], "New");
    assert_eq!(lead["priority_score"], 9.0);
    assert_eq!(lead["assigned_officer"]["name"], "Amit Das");
    assert_eq!(lead["proximity"]["nearest_facility"], "Kolkata Terminal");
    assert_eq!(lead["is_verified"], true);

    let id = lead["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/leads/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
}

#[tokio::test]
async fn test_ingest_no_match() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/signals",
        Some(json!({ "id": "sig-9", "text": "Board approves dividend" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched"], false);
    assert_eq!(body["signal_id"], "sig-9");
}

#[tokio::test]
async fn test_ingest_empty_text() {
    let (status, _) = send(&app(), "POST", "/api/signals", Some(json!({ "text": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ingest_rejects_trust_above_100() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/signals",
        Some(json!({ "text": "Genset order", "source_trust": 200 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "source_trust");
}

#[tokio::test]
async fn test_classify() {
    let (status, body) = send(
        &app(),
        "POST",
        "/api/classify",
        Some(json!({ "text": "New boiler installation underway at steel plant" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"]["product"], "Furnace Oil (FO)");
    assert_eq!(body["classification"]["industry"], "Manufacturing");
    assert_eq!(body["classification"]["confidence"], 90);
}

#[tokio::test]
async fn test_proximity_endpoint() {
    let (status, body) = send(&app(), "GET", "/api/proximity?lat=19.0760&lon=72.8777", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nearest_facility"], "Mumbai Refinery");
    assert_eq!(body["distance_km"], 0.0);
    assert_eq!(body["distance_display"], "0.0 km");

    let (status, _) = send(&app(), "GET", "/api/proximity?lat=95&lon=72", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_officer_assignment_endpoint() {
    let app = app();
    let (_, body) = send(&app, "GET", "/api/officers/assign?location=Nagpur,%20MH", None).await;
    assert_eq!(body["officer"]["name"], "Rohan Sharma");
    assert_eq!(body["fallback"], false);

    let (_, body) = send(&app, "GET", "/api/officers/assign?location=Surat", None).await;
    assert_eq!(body["officer"]["name"], "Regional Sales Manager");
    assert_eq!(body["fallback"], true);
}

#[tokio::test]
async fn test_feedback_flow() {
    let app = app();
    let lead = create_lead(&app, "Glass plant furnace rebuild", "Kolkata, WB").await;
    let id = lead["id"].as_str().unwrap();
    let uri = format!("/api/leads/{id}/feedback");

    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({
            "outcome": "dismissed",
            "rejection_reason": "Competitor Active",
            "source_unreliable": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Rejected");
    assert!((body["priority_score"].as_f64().unwrap() - 7.2).abs() < 1e-9);
    assert_eq!(
        body["feedback_note"],
        "REASON: Competitor Active | SOURCE_UNRELIABLE: YES | CONTEXT: None"
    );
    assert_eq!(body["version"], 1);

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "outcome": "converted" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Converted");
    assert_eq!(body["priority_score"], 10.0);

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "outcome": "converted" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority_score"], 10.0);
    assert_eq!(body["version"], 2);

    // Converted is terminal
    let (status, body) = send(&app, "POST", &uri, Some(json!({ "outcome": "accepted" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "status");
}

#[tokio::test]
async fn test_feedback_validation_errors() {
    let app = app();
    let lead = create_lead(&app, "Genset rental for pumping station", "Chennai, TN").await;
    let id = lead["id"].as_str().unwrap();
    let uri = format!("/api/leads/{id}/feedback");

    let (status, body) = send(&app, "POST", &uri, Some(json!({ "rating": 4 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["field"], "outcome");

    let (status, _) = send(&app, "POST", &uri, Some(json!({ "outcome": "dismissed" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "outcome": "accepted", "rating": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Lead unchanged after rejected feedback
    let (_, fetched) = send(&app, "GET", &format!("/api/leads/{id}"), None).await;
    assert_eq!(fetched["status"], "New");
    assert_eq!(fetched["version"], 0);
}

#[tokio::test]
async fn test_feedback_unknown_lead() {
    let (status, _) = send(
        &app(),
        "POST",
        "/api/leads/missing/feedback",
        Some(json!({ "outcome": "accepted" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_leads_by_status() {
    let app = app();
    create_lead(&app, "Highway paving contract", "Kolkata, WB").await;
    let jute = create_lead(&app, "Jute mill upgrade", "Kolkata, WB").await;
    let id = jute["id"].as_str().unwrap();
    send(
        &app,
        "POST",
        &format!("/api/leads/{id}/feedback"),
        Some(json!({ "outcome": "accepted" })),
    )
    .await;

    let (_, all) = send(&app, "GET", "/api/leads", None).await;
    assert_eq!(all["count"], 2);
    // Acceptance lifted the jute lead from 9.0 to the 10.0 cap, above the 9.5 bitumen lead
    assert_eq!(all["leads"][0]["id"], id);
    assert_eq!(all["leads"][1]["recommended_product"], "Bitumen (VG-30/VG-40)");

    let (_, accepted) = send(&app, "GET", "/api/leads?status=Accepted", None).await;
    assert_eq!(accepted["count"], 1);
    assert_eq!(accepted["leads"][0]["id"], id);
}

#[tokio::test]
async fn test_dispatch_next() {
    let app = app();
    let (_, body) = send(&app, "POST", "/api/dispatch/next", None).await;
    assert_eq!(body["dispatched"], false);

    create_lead(&app, "Genset for lift irrigation", "Kolkata, WB").await;
    let top = create_lead(&app, "NHAI expressway tender", "Kolkata, WB").await;

    let (status, body) = send(&app, "POST", "/api/dispatch/next", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dispatched"], true);
    assert_eq!(body["lead_id"], top["id"]);
    let alert = body["alert"].as_str().unwrap();
    assert!(alert.contains("Priority: 9.5/10.0"));
    assert!(alert.contains("Officer: Amit Das"));

    // Already dispatched leads are skipped
    let (_, body) = send(&app, "POST", "/api/dispatch/next", None).await;
    assert_eq!(body["dispatched"], true);
    assert_ne!(body["lead_id"], top["id"]);

    let (_, body) = send(&app, "POST", "/api/dispatch/next", None).await;
    assert_eq!(body["dispatched"], false);
}

#[tokio::test]
async fn test_registry_reload() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    let mut config = RegistryConfig::default();
    config.version = "1.0.0".to_string();
    file.write_all(serde_yaml_string(&config).as_bytes()).unwrap();

    let registry = RegistryManager::from_file(file.path()).unwrap();
    let state = AppState::new(Settings::default(), registry).unwrap();
    let app = create_router(state);

    config.version = "1.1.0".to_string();
    config.products.truncate(1);
    std::fs::write(file.path(), serde_yaml_string(&config)).unwrap();

    let (status, body) = send(&app, "POST", "/api/registry/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "1.1.0");

    let (_, ready) = send(&app, "GET", "/ready", None).await;
    assert_eq!(ready["products"], 1);
}

#[tokio::test]
async fn test_invalid_registry_reload_keeps_engine() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(serde_yaml_string(&RegistryConfig::default()).as_bytes())
        .unwrap();

    let registry = RegistryManager::from_file(file.path()).unwrap();
    let state = AppState::new(Settings::default(), registry).unwrap();
    let app = create_router(state);

    std::fs::write(file.path(), "products: []\nfacilities: []\n").unwrap();

    let (status, body) = send(&app, "POST", "/api/registry/reload", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, ready) = send(&app, "GET", "/ready", None).await;
    assert_eq!(ready["products"], 6);
    assert_eq!(ready["facilities"], 5);

    // Leads still route through the previous registry
    let lead = create_lead(&app, "Jute mill upgrade", "Kolkata, WB").await;
    assert_eq!(lead["proximity"]["nearest_facility"], "Kolkata Terminal");
}

#[tokio::test]
async fn test_registry_reload_without_file() {
    let (status, _) = send(&app(), "POST", "/api/registry/reload", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_metrics_disabled_without_recorder() {
    let (status, _) = send(&app(), "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

fn serde_yaml_string(config: &RegistryConfig) -> String {
    let path = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    config.to_yaml_file(path.path()).unwrap();
    std::fs::read_to_string(path.path()).unwrap()
}
