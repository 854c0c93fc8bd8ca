use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use model::entities::prelude::{Genre, User};
use model::entities::{genre, user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new genre
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateGenreRequest {
    /// Genre name (must be unique)
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Genre response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreResponse {
    fn from(model: genre::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// A post as shown on its board, with the author's current name resolved
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardPostResponse {
    pub id: i32,
    pub name: String,
    pub content: String,
    pub user_id: i32,
    pub author_name: String,
}

/// A genre board: the genre plus everything posted on it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BoardResponse {
    pub genre: GenreResponse,
    pub posts: Vec<BoardPostResponse>,
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/api/v1/genres",
    tag = "genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created successfully", body = ApiResponse<GenreResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Genre already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_genre(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<CreateGenreRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<GenreResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_genre function");
    debug!("Creating genre with name: {}", request.name);

    // Insert directly; the unique key decides whether the name is new
    let new_genre = genre::ActiveModel {
        name: Set(request.name.clone()),
        ..Default::default()
    };

    trace!("Attempting to insert new genre into database");
    match new_genre.insert(&state.db).await {
        Ok(genre_model) => {
            info!(
                "Genre created successfully with ID: {}, name: {}",
                genre_model.id, genre_model.name
            );
            let response = ApiResponse {
                data: GenreResponse::from(genre_model),
                message: "Genre created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Genre name '{}' already exists", request.name);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Genre with name '{}' already exists", request.name),
                    code: "GENRE_ALREADY_EXISTS".to_string(),
                    success: false,
                }),
            ))
        }
        Err(e) => {
            error!("Failed to create genre '{}': {}", request.name, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while creating genre".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get all genres
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genres retrieved successfully", body = ApiResponse<Vec<GenreResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_genres(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<GenreResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_genres function");

    // Alphabetical, the order the genre picker shows them in
    match Genre::find()
        .order_by_asc(genre::Column::Name)
        .all(&state.db)
        .await
    {
        Ok(genres) => {
            debug!("Retrieved {} genres", genres.len());
            let response = ApiResponse {
                data: genres.into_iter().map(GenreResponse::from).collect(),
                message: "Genres retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to retrieve genres: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving genres".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get a genre board: the genre and all posts on it
#[utoipa::path(
    get,
    path = "/api/v1/genres/{genre_id}",
    tag = "genres",
    params(
        ("genre_id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Board retrieved successfully", body = ApiResponse<BoardResponse>),
        (status = 404, description = "Genre not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_genre_board(
    Path(genre_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<BoardResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_genre_board function");
    debug!("Retrieving board for genre ID: {}", genre_id);

    let board = match Genre::find_by_id(genre_id).one(&state.db).await {
        Ok(Some(board)) => board,
        Ok(None) => {
            warn!("Genre with ID {} not found", genre_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Genre with ID {genre_id} not found"),
                    code: "GENRE_NOT_FOUND".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to retrieve genre {}: {}", genre_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving board".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let board_posts = match board.posts(&state.db).await {
        Ok(posts) => posts,
        Err(e) => {
            error!("Failed to retrieve posts for genre {}: {}", genre_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving board".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // Resolve the posters' current names in one query
    let author_ids: Vec<i32> = board_posts.iter().map(|p| p.user_id).collect();
    let authors: HashMap<i32, String> = match User::find()
        .filter(user::Column::Id.is_in(author_ids))
        .all(&state.db)
        .await
    {
        Ok(members) => members.into_iter().map(|m| (m.id, m.name)).collect(),
        Err(e) => {
            error!("Failed to resolve post authors for genre {}: {}", genre_id, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while retrieving board".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let posts = board_posts
        .into_iter()
        .map(|p| BoardPostResponse {
            id: p.id,
            name: p.name,
            content: p.content,
            user_id: p.user_id,
            author_name: authors.get(&p.user_id).cloned().unwrap_or_default(),
        })
        .collect();

    let response = ApiResponse {
        data: BoardResponse {
            genre: GenreResponse::from(board),
            posts,
        },
        message: "Board retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
