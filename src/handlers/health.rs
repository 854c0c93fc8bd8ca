use crate::schemas::{AppState, HealthResponse, ServiceInfo};
use axum::{extract::State, http::StatusCode, response::Json};
use tracing::instrument;

/// Service descriptor for the root path
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service descriptor", body = ServiceInfo)
    )
)]
#[instrument]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "TuneBoard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs_url: "/swagger-ui".to_string(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    // Test database connection
    let db_status = match state.db.ping().await {
        Ok(_) => "connected".to_string(),
        Err(_) => "disconnected".to_string(),
    };

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    };

    Ok(Json(response))
}
