//! Prometheus metrics

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use lead_pulse_core::FeedbackOutcome;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;
use crate::ServerError;

/// Install the global Prometheus recorder
///
/// Only one recorder can exist per process; a second call fails.
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Internal(format!("metrics recorder: {}", e)))
}

/// Render metrics in the Prometheus text format
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics disabled".to_string(),
        ),
    }
}

/// `result` is one of matched, unmatched, rejected
pub fn record_signal(result: &'static str) {
    metrics::counter!("lead_pulse_signals_total", "result" => result).increment(1);
}

pub fn record_feedback(outcome: FeedbackOutcome) {
    metrics::counter!("lead_pulse_feedback_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_conflict() {
    metrics::counter!("lead_pulse_conflicts_total").increment(1);
}

pub fn record_dispatch() {
    metrics::counter!("lead_pulse_dispatches_total").increment(1);
}
