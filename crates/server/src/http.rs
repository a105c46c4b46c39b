//! HTTP Endpoints
//!
//! REST API for the review dashboard and the signal feeds.

use std::time::Duration;

use axum::{
    extract::{Json, Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use lead_pulse_core::{Coordinates, Error, FeedbackRequest, LeadStatus, RawSignal};
use lead_pulse_engine::{format_alert, format_distance_km, mark_dispatched, next_priority_lead};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::metrics::{
    metrics_handler, record_conflict, record_dispatch, record_feedback, record_signal,
};
use crate::state::AppState;
use crate::ServerError;

const DEFAULT_DASHBOARD_ORIGIN: &str = "http://localhost:3000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    Router::new()
        // Signal intake
        .route("/api/signals", post(ingest_signal))
        .route("/api/classify", post(classify_text))

        // Lookups
        .route("/api/proximity", get(nearest_facility))
        .route("/api/officers/assign", get(assign_officer))

        // Leads and feedback
        .route("/api/leads", get(list_leads))
        .route("/api/leads/:id", get(get_lead))
        .route("/api/leads/:id/feedback", post(submit_feedback))

        // Dispatch
        .route("/api/dispatch/next", post(dispatch_next))

        // Registry
        .route("/api/registry/reload", post(reload_registry))

        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))

        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty or all invalid, allows the local dashboard only
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!(
            "No usable CORS origins configured, defaulting to {}",
            DEFAULT_DASHBOARD_ORIGIN
        );
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static(DEFAULT_DASHBOARD_ORIGIN))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Signal as posted by a feed
#[derive(Debug, Deserialize)]
struct SignalRequest {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    source_trust: Option<u8>,
}

impl SignalRequest {
    fn into_signal(self) -> Result<RawSignal, ServerError> {
        if self.text.trim().is_empty() {
            return Err(ServerError::InvalidRequest("text cannot be empty".to_string()));
        }

        if let Some(trust) = self.source_trust.filter(|t| *t > 100) {
            return Err(ServerError::Validation {
                field: "source_trust".to_string(),
                message: format!("must be within 0-100, got {}", trust),
            });
        }

        let coordinates = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            (None, None) => None,
            _ => {
                return Err(ServerError::InvalidRequest(
                    "latitude and longitude must be given together".to_string(),
                ))
            }
        };

        Ok(RawSignal {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            text: self.text,
            company_name: self.company_name,
            location: self.location,
            coordinates,
            source_url: self.source_url,
            source_trust: self.source_trust,
        })
    }
}

/// Ingest one signal
async fn ingest_signal(
    State(state): State<AppState>,
    Json(request): Json<SignalRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let signal = request.into_signal()?;

    let lead = match state.engine().ingest(&signal) {
        Ok(Some(lead)) => lead,
        Ok(None) => {
            record_signal("unmatched");
            return Ok((
                StatusCode::OK,
                Json(serde_json::json!({
                    "matched": false,
                    "signal_id": signal.id,
                })),
            ));
        }
        Err(e) => {
            record_signal("rejected");
            return Err(e.into());
        }
    };

    state.leads.insert(lead.clone()).await?;
    record_signal("matched");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "matched": true,
            "lead": lead,
        })),
    ))
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    text: String,
}

/// Classify text without creating a lead
async fn classify_text(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Json<serde_json::Value> {
    match state.engine().classify(&request.text) {
        Some(result) => Json(serde_json::json!({
            "matched": true,
            "classification": result,
        })),
        None => Json(serde_json::json!({ "matched": false })),
    }
}

#[derive(Debug, Deserialize)]
struct ProximityQuery {
    lat: f64,
    lon: f64,
}

async fn nearest_facility(
    State(state): State<AppState>,
    Query(query): Query<ProximityQuery>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let engine = state.engine();
    let (facility, distance_km) = engine.nearest_facility(query.lat, query.lon)?;

    Ok(Json(serde_json::json!({
        "nearest_facility": facility.name,
        "latitude": facility.latitude,
        "longitude": facility.longitude,
        "distance_km": distance_km,
        "distance_display": format!("{} km", format_distance_km(distance_km)),
    })))
}

#[derive(Debug, Deserialize)]
struct AssignQuery {
    #[serde(default)]
    location: String,
}

async fn assign_officer(
    State(state): State<AppState>,
    Query(query): Query<AssignQuery>,
) -> Json<serde_json::Value> {
    let engine = state.engine();
    let officer = engine.assign_officer(&query.location);
    let is_fallback = officer == engine.officers().fallback();

    Json(serde_json::json!({
        "officer": officer,
        "fallback": is_fallback,
    }))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    #[serde(default)]
    status: Option<LeadStatus>,
}

/// List leads, highest priority first
async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let leads = state.leads.list(query.status).await?;
    Ok(Json(serde_json::json!({
        "count": leads.len(),
        "leads": leads,
    })))
}

async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let lead = state
        .leads
        .get(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("lead {}", id)))?;

    Ok(Json(serde_json::json!(lead)))
}

/// Apply reviewer feedback to a lead
async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let event = request.into_event()?;

    let current = state
        .leads
        .get(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("lead {}", id)))?;

    let updated = state.engine().apply_feedback(&current, &event)?;

    if let Err(e) = state
        .leads
        .compare_and_swap(updated.clone(), current.version)
        .await
    {
        if matches!(e, Error::ConcurrencyConflict { .. }) {
            record_conflict();
            tracing::warn!(lead_id = %id, error = %e, "Feedback lost a concurrent update");
        }
        return Err(e.into());
    }

    record_feedback(event.outcome);
    tracing::info!(
        lead_id = %id,
        outcome = event.outcome.as_str(),
        status = %updated.status,
        priority = updated.priority_score,
        "Feedback applied"
    );

    Ok(Json(serde_json::json!(updated)))
}

/// Dispatch the next priority lead to its officer
async fn dispatch_next(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let queue = state.leads.list(Some(LeadStatus::New)).await?;

    let Some(lead) = next_priority_lead(&queue) else {
        return Ok(Json(serde_json::json!({
            "dispatched": false,
            "message": "Dispatch queue is empty",
        })));
    };

    let engine = state.engine();
    let officer = engine
        .officers()
        .find_by_name(&lead.assigned_officer.name)
        .unwrap_or_else(|| engine.assign_officer(&lead.location));
    let alert = format_alert(lead, officer);

    let dispatched = mark_dispatched(lead);
    if let Err(e) = state
        .leads
        .compare_and_swap(dispatched.clone(), lead.version)
        .await
    {
        if matches!(e, Error::ConcurrencyConflict { .. }) {
            record_conflict();
        }
        return Err(e.into());
    }

    record_dispatch();
    tracing::info!(
        lead_id = %dispatched.id,
        officer = %officer.name,
        priority = dispatched.priority_score,
        "Lead dispatched"
    );

    Ok(Json(serde_json::json!({
        "dispatched": true,
        "lead_id": dispatched.id,
        "officer": officer,
        "alert": alert,
    })))
}

async fn reload_registry(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let version = state.reload_registry()?;
    Ok(Json(serde_json::json!({
        "reloaded": true,
        "version": version,
    })))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine();

    Json(serde_json::json!({
        "status": "ready",
        "leads": state.leads.count().await,
        "products": engine.classifier().rules().len(),
        "facilities": engine.proximity().facilities().len(),
        "officers": engine.officers().officers().len(),
    }))
}
