use crate::handlers::comments::CommentResponse;
use crate::identity::{resolve_identity, Identity};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use axum_valid::Valid;
use model::entities::post;
use model::entities::prelude::{Genre, Post, User};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new post
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// The genre board to post on
    pub genre_id: i32,
    /// The post title
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 4096))]
    pub content: String,
}

/// Post response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: i32,
    pub genre_id: i32,
    pub user_id: i32,
    pub name: String,
    pub content: String,
}

impl From<post::Model> for PostResponse {
    fn from(model: post::Model) -> Self {
        Self {
            id: model.id,
            genre_id: model.genre_id,
            user_id: model.user_id,
            name: model.name,
            content: model.content,
        }
    }
}

/// A single post with its board name, author and comments
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    /// Name of the genre board the post lives on
    pub genre_name: String,
    /// The author's current display name
    pub author_name: String,
    /// Comments in the order they were written, each with the author name
    /// snapshotted at write time
    pub comments: Vec<CommentResponse>,
}

/// Create a new post on a genre board
///
/// Requires a logged-in identity; the post is always attributed to it.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created successfully", body = ApiResponse<PostResponse>),
        (status = 400, description = "Invalid request or unknown genre", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Valid(Json(request)): Valid<Json<CreatePostRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_post function");

    let author = match resolve_identity(&state.db, &headers).await {
        Ok(Identity::Known(member)) => member,
        Ok(Identity::Anonymous) => {
            warn!("Rejected anonymous attempt to create a post");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Log in to post".to_string(),
                    code: "AUTHENTICATION_REQUIRED".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to resolve identity: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    debug!(
        "Creating post '{}' on genre {} for member {}",
        request.name, request.genre_id, author.id
    );

    // The target board must exist before anything is written
    match Genre::find_by_id(request.genre_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Post creation referenced unknown genre {}", request.genre_id);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Genre with ID {} does not exist", request.genre_id),
                    code: "INVALID_GENRE_ID".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to check genre {}: {}", request.genre_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let new_post = post::ActiveModel {
        genre_id: Set(request.genre_id),
        user_id: Set(author.id),
        name: Set(request.name.clone()),
        content: Set(request.content.clone()),
        ..Default::default()
    };

    trace!("Attempting to insert new post into database");
    match new_post.insert(&state.db).await {
        Ok(post_model) => {
            info!(
                "Post created successfully with ID: {}, title: {}",
                post_model.id, post_model.name
            );
            let response = ApiResponse {
                data: PostResponse::from(post_model),
                message: "Post created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create post '{}': {}", request.name, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get a post with its comments
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post retrieved successfully", body = ApiResponse<PostDetailResponse>),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_post(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_post function");
    debug!("Retrieving post with ID: {}", post_id);

    let post_model = match Post::find_by_id(post_id).one(&state.db).await {
        Ok(Some(post_model)) => post_model,
        Ok(None) => {
            warn!("Post with ID {} not found", post_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Post with ID {post_id} not found"),
                    code: "POST_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to retrieve post {}: {}", post_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // Board and author rows are guaranteed by the foreign keys; their
    // absence is a fault, not a 404
    let genre_name = match Genre::find_by_id(post_model.genre_id).one(&state.db).await {
        Ok(Some(board)) => board.name,
        Ok(None) => {
            error!("Post {} references missing genre {}", post_id, post_model.genre_id);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to retrieve genre for post {}: {}", post_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let author_name = match User::find_by_id(post_model.user_id).one(&state.db).await {
        Ok(Some(author)) => author.name,
        Ok(None) => {
            error!("Post {} references missing user {}", post_id, post_model.user_id);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to retrieve author for post {}: {}", post_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let comments = match post_model.comments(&state.db).await {
        Ok(comments) => comments.into_iter().map(CommentResponse::from).collect(),
        Err(e) => {
            error!("Failed to retrieve comments for post {}: {}", post_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving post".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let response = ApiResponse {
        data: PostDetailResponse {
            post: PostResponse::from(post_model),
            genre_name,
            author_name,
            comments,
        },
        message: "Post retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
