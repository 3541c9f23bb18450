//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub storage: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    /// Which backend answered the check
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies storage connectivity.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => ServiceHealth {
                status: "healthy".to_string(),
                backend: "postgres".to_string(),
                error: None,
            },
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                ServiceHealth {
                    status: "unhealthy".to_string(),
                    backend: "postgres".to_string(),
                    error: Some(e.to_string()),
                }
            }
        },
        None => ServiceHealth {
            status: "healthy".to_string(),
            backend: "memory".to_string(),
            error: None,
        },
    };

    let all_healthy = storage.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services: ServiceStatus { storage },
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
