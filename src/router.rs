use crate::handlers::{
    artists::{get_artist, get_artists},
    auth::{login, logout, register_artist, register_member},
    comments::create_comment,
    genres::{create_genre, get_genre_board, get_genres},
    health::{health_check, service_info},
    posts::{create_post, get_post},
    users::get_my_page,
};
use crate::schemas::{ApiDoc, AppState, ErrorResponse};
use axum::{
    http::{StatusCode, Uri},
    response::Json,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service info and health check
        .route("/", get(service_info))
        .route("/health", get(health_check))
        // Registration and session routes
        .route("/api/v1/auth/register", post(register_member))
        .route("/api/v1/auth/register/artist", post(register_artist))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        // Genre board routes
        .route("/api/v1/genres", post(create_genre))
        .route("/api/v1/genres", get(get_genres))
        .route("/api/v1/genres/:genre_id", get(get_genre_board))
        // Post and comment routes
        .route("/api/v1/posts", post(create_post))
        .route("/api/v1/posts/:post_id", get(get_post))
        .route("/api/v1/posts/:post_id/comments", post(create_comment))
        // Member routes
        .route("/api/v1/me", get(get_my_page))
        .route("/api/v1/artists", get(get_artists))
        .route("/api/v1/artists/:name", get(get_artist))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Unknown paths answer in the same JSON shape as everything else
        .fallback(route_not_found)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    warn!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("No route for {uri}"),
            code: "ROUTE_NOT_FOUND".to_string(),
            success: false,
        }),
    )
}
