//! Route configuration.

use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health_routes, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Base path of the versioned REST API.
pub const API_BASE_PATH: &str = "/api/v1";

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // User management
        .nest(&format!("{}/users", API_BASE_PATH), user_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
