use crate::handlers::posts::PostResponse;
use crate::identity::{resolve_identity, Identity};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::user;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Public view of a member; the password hash never leaves the database
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub home_town: i32,
    pub bio: String,
    pub is_musician: bool,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            home_town: model.home_town,
            bio: model.bio,
            is_musician: model.is_musician,
        }
    }
}

/// A member's own page: profile plus everything they have posted
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MyPageResponse {
    pub user: UserResponse,
    pub posts: Vec<PostResponse>,
}

/// Get the logged-in member's own page
#[utoipa::path(
    get,
    path = "/api/v1/me",
    tag = "users",
    responses(
        (status = 200, description = "Member page retrieved successfully", body = ApiResponse<MyPageResponse>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_my_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MyPageResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_my_page function");

    let member = match resolve_identity(&state.db, &headers).await {
        Ok(Identity::Known(member)) => member,
        Ok(Identity::Anonymous) => {
            warn!("Rejected anonymous attempt to view the member page");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Log in to view your page".to_string(),
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
                    error: "Internal server error while retrieving member page".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    debug!("Retrieving member page for user {}", member.id);

    let posts = match member.posts(&state.db).await {
        Ok(posts) => {
            debug!("Retrieved {} posts for user {}", posts.len(), member.id);
            posts.into_iter().map(PostResponse::from).collect()
        }
        Err(e) => {
            error!("Failed to retrieve posts for user {}: {}", member.id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving member page".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    info!("Member page retrieved for user {}", member.id);
    let response = ApiResponse {
        data: MyPageResponse {
            user: UserResponse::from(member),
            posts,
        },
        message: "Member page retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
