use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::artists::{ArtistDetailResponse, ArtistDirectoryResponse};
use crate::handlers::auth::{LoginRequest, RegisterRequest, SessionResponse};
use crate::handlers::comments::{CommentResponse, CreateCommentRequest};
use crate::handlers::genres::{BoardPostResponse, BoardResponse, CreateGenreRequest, GenreResponse};
use crate::handlers::posts::{CreatePostRequest, PostDetailResponse, PostResponse};
use crate::handlers::users::{MyPageResponse, UserResponse};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Service descriptor returned at the root path
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// Service name
    pub name: String,
    /// Service version
    pub version: String,
    /// Where the interactive API documentation lives
    pub docs_url: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::service_info,
        crate::handlers::health::health_check,
        crate::handlers::auth::register_member,
        crate::handlers::auth::register_artist,
        crate::handlers::auth::login,
        crate::handlers::auth::logout,
        crate::handlers::genres::create_genre,
        crate::handlers::genres::get_genres,
        crate::handlers::genres::get_genre_board,
        crate::handlers::posts::create_post,
        crate::handlers::posts::get_post,
        crate::handlers::comments::create_comment,
        crate::handlers::users::get_my_page,
        crate::handlers::artists::get_artists,
        crate::handlers::artists::get_artist,
    ),
    components(
        schemas(
            ApiResponse<SessionResponse>,
            ApiResponse<GenreResponse>,
            ApiResponse<Vec<GenreResponse>>,
            ApiResponse<BoardResponse>,
            ApiResponse<PostResponse>,
            ApiResponse<PostDetailResponse>,
            ApiResponse<CommentResponse>,
            ApiResponse<MyPageResponse>,
            ApiResponse<ArtistDirectoryResponse>,
            ApiResponse<ArtistDetailResponse>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            ServiceInfo,
            RegisterRequest,
            LoginRequest,
            SessionResponse,
            UserResponse,
            MyPageResponse,
            CreateGenreRequest,
            GenreResponse,
            BoardResponse,
            BoardPostResponse,
            CreatePostRequest,
            PostResponse,
            PostDetailResponse,
            CreateCommentRequest,
            CommentResponse,
            ArtistDirectoryResponse,
            ArtistDetailResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health endpoints"),
        (name = "auth", description = "Registration, login and logout"),
        (name = "genres", description = "Genre boards"),
        (name = "posts", description = "Posts on genre boards"),
        (name = "comments", description = "Comments on posts"),
        (name = "users", description = "The logged-in member's own page"),
        (name = "artists", description = "Artist directory and detail pages"),
    ),
    info(
        title = "TuneBoard API",
        description = "Music community forum API - genre boards, posts, comments and artist pages",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
