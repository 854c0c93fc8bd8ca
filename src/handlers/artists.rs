use crate::handlers::posts::PostResponse;
use crate::handlers::users::UserResponse;
use crate::identity::{resolve_identity, Identity};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use model::entities::prelude::User;
use model::entities::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// The artist directory, split into everyone and the viewer's home town
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArtistDirectoryResponse {
    /// Every member registered as an artist, by name
    pub artists: Vec<UserResponse>,
    /// Artists from the viewer's home town, by name
    pub local_artists: Vec<UserResponse>,
}

/// A single artist with their posts
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ArtistDetailResponse {
    pub artist: UserResponse,
    pub posts: Vec<PostResponse>,
}

/// Get the artist directory
///
/// Requires a logged-in identity; the local section is keyed on the
/// viewer's home town.
#[utoipa::path(
    get,
    path = "/api/v1/artists",
    tag = "artists",
    responses(
        (status = 200, description = "Artist directory retrieved successfully", body = ApiResponse<ArtistDirectoryResponse>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn get_artists(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<ArtistDirectoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_artists function");

    let viewer = match resolve_identity(&state.db, &headers).await {
        Ok(Identity::Known(member)) => member,
        Ok(Identity::Anonymous) => {
            warn!("Rejected anonymous attempt to view the artist directory");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Log in to browse artists".to_string(),
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
                    error: "Internal server error while retrieving artists".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    debug!(
        "Building artist directory for viewer {} (home town {})",
        viewer.id, viewer.home_town
    );

    let artists = match User::find()
        .filter(user::Column::IsMusician.eq(true))
        .order_by_asc(user::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(artists) => {
            debug!("Retrieved {} artists", artists.len());
            artists.into_iter().map(UserResponse::from).collect()
        }
        Err(e) => {
            error!("Failed to retrieve artists: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving artists".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // Artists only, narrowed to the viewer's home town. A non-artist
    // viewer never appears in their own local list.
    let local_artists = match User::find()
        .filter(user::Column::IsMusician.eq(true))
        .filter(user::Column::HomeTown.eq(viewer.home_town))
        .order_by_asc(user::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(locals) => {
            debug!(
                "Retrieved {} artists from home town {}",
                locals.len(),
                viewer.home_town
            );
            locals.into_iter().map(UserResponse::from).collect()
        }
        Err(e) => {
            error!("Failed to retrieve local artists: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving artists".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    info!("Artist directory retrieved for viewer {}", viewer.id);
    let response = ApiResponse {
        data: ArtistDirectoryResponse {
            artists,
            local_artists,
        },
        message: "Artist directory retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a member's public page by name
#[utoipa::path(
    get,
    path = "/api/v1/artists/{name}",
    tag = "artists",
    params(
        ("name" = String, Path, description = "Member name")
    ),
    responses(
        (status = 200, description = "Artist retrieved successfully", body = ApiResponse<ArtistDetailResponse>),
        (status = 404, description = "Artist not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_artist(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ArtistDetailResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_artist function");
    debug!("Retrieving artist page for '{}'", name);

    let artist = match User::find()
        .filter(user::Column::Name.eq(name.clone()))
        .one(&state.db)
        .await
    {
        Ok(Some(member)) => member,
        Ok(None) => {
            warn!("Artist '{}' not found", name);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Artist '{name}' not found"),
                    code: "ARTIST_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to retrieve artist '{}': {}", name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving artist".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let posts = match artist.posts(&state.db).await {
        Ok(posts) => posts.into_iter().map(PostResponse::from).collect(),
        Err(e) => {
            error!("Failed to retrieve posts for artist '{}': {}", name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving artist".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    info!("Artist page retrieved for '{}'", name);
    let response = ApiResponse {
        data: ArtistDetailResponse {
            artist: UserResponse::from(artist),
            posts,
        },
        message: "Artist retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
