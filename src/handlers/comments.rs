use crate::identity::{resolve_identity, Identity};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use axum_valid::Valid;
use model::entities::comment;
use model::entities::prelude::Post;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for commenting on a post
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1024))]
    pub content: String,
}

/// Comment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i32,
    pub content: String,
    /// The commenter's name as it was when the comment was written
    pub author_name: String,
    pub post_id: i32,
    pub user_id: i32,
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            author_name: model.author_name,
            post_id: model.post_id,
            user_id: model.user_id,
        }
    }
}

/// Comment on a post
///
/// Requires a logged-in identity. The commenter's name is copied onto the
/// comment, so later renames leave existing comments untouched.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/comments",
    tag = "comments",
    params(
        ("post_id" = i32, Path, description = "Post ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created successfully", body = ApiResponse<CommentResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn create_comment(
    Path(post_id): Path<i32>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Valid(Json(request)): Valid<Json<CreateCommentRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_comment function");

    let author = match resolve_identity(&state.db, &headers).await {
        Ok(Identity::Known(member)) => member,
        Ok(Identity::Anonymous) => {
            warn!("Rejected anonymous attempt to comment on post {}", post_id);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Log in to comment".to_string(),
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
                    error: "Internal server error while creating comment".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    debug!("Member {} commenting on post {}", author.id, post_id);

    match Post::find_by_id(post_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Comment referenced unknown post {}", post_id);
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
            error!("Failed to check post {}: {}", post_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating comment".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let new_comment = comment::ActiveModel {
        content: Set(request.content.clone()),
        // Snapshot of the current display name, not a join
        author_name: Set(author.name.clone()),
        post_id: Set(post_id),
        user_id: Set(author.id),
        ..Default::default()
    };

    trace!("Attempting to insert new comment into database");
    match new_comment.insert(&state.db).await {
        Ok(comment_model) => {
            info!(
                "Comment created successfully with ID: {} on post {}",
                comment_model.id, post_id
            );
            let response = ApiResponse {
                data: CommentResponse::from(comment_model),
                message: "Comment created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create comment on post {}: {}", post_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating comment".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
