//! Lead Pulse Server
//!
//! HTTP endpoints for signal intake, lead review, feedback and dispatch.

pub mod http;
pub mod metrics;
pub mod state;
pub mod store;

pub use http::create_router;
pub use metrics::{
    init_metrics, record_conflict, record_dispatch, record_feedback, record_signal,
};
pub use state::AppState;
pub use store::{InMemoryLeadStore, LeadStore};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        (&err).into()
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<lead_pulse_core::Error> for ServerError {
    fn from(err: lead_pulse_core::Error) -> Self {
        use lead_pulse_core::Error;

        match err {
            Error::Validation { field, message } => ServerError::Validation { field, message },
            Error::ConcurrencyConflict { .. } => ServerError::Conflict(err.to_string()),
            Error::NotFound(what) => ServerError::NotFound(what),
            Error::Configuration(msg) => ServerError::Configuration(msg),
        }
    }
}

impl From<lead_pulse_config::ConfigError> for ServerError {
    fn from(err: lead_pulse_config::ConfigError) -> Self {
        ServerError::Configuration(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = match &self {
            ServerError::Validation { field, message } => serde_json::json!({
                "error": self.to_string(),
                "field": field,
                "message": message,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
