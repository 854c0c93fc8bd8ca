use crate::handlers::users::UserResponse;
use crate::identity;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use axum_valid::Valid;
use chrono::Utc;
use model::entities::prelude::{Session, User};
use model::entities::{session, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering a member or an artist
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name; doubles as the login name (must be unique)
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Zip code of the member's home town
    pub home_town: i32,
    /// Short introduction shown on the member's pages
    #[validate(length(max = 64))]
    pub bio: String,
    /// Clear-text password; only its Argon2 hash is stored
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    /// Must repeat `password` exactly
    pub password_confirmation: String,
}

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// The name used at registration
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// A fresh login: the bearer token plus the member it belongs to
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub user: UserResponse,
}

/// Register a new member account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Member registered and logged in", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register_member(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), (StatusCode, Json<ErrorResponse>)> {
    register(&state, request, false).await
}

/// Register a new artist account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register/artist",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Artist registered and logged in", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn register_artist(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), (StatusCode, Json<ErrorResponse>)> {
    register(&state, request, true).await
}

/// Shared registration path; member and artist accounts differ only in the
/// `is_musician` flag.
async fn register(
    state: &AppState,
    request: RegisterRequest,
    is_musician: bool,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering register function");
    debug!("Registering '{}' (artist: {})", request.name, is_musician);

    if request.password != request.password_confirmation {
        warn!("Password confirmation mismatch for '{}'", request.name);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Password and confirmation do not match".to_string(),
                code: "PASSWORD_MISMATCH".to_string(),
                success: false,
            }),
        ));
    }

    let password_hash = match identity::hash_password(&request.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password for '{}': {}", request.name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while registering".to_string(),
                    code: "PASSWORD_HASH_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // No read-before-write: the unique key on users.name is the arbiter, so
    // of two concurrent registrations exactly one row wins.
    let new_member = user::ActiveModel {
        name: Set(request.name.clone()),
        password_hash: Set(password_hash),
        home_town: Set(request.home_town),
        bio: Set(request.bio.clone()),
        is_musician: Set(is_musician),
        ..Default::default()
    };

    trace!("Attempting to insert new member into database");
    let member = match new_member.insert(&state.db).await {
        Ok(member) => member,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            warn!("Name '{}' is already taken", request.name);
            return Err((
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Name '{}' is already taken", request.name),
                    code: "NAME_TAKEN".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to register '{}': {}", request.name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while registering".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    info!(
        "Member registered with ID: {}, name: {}, artist: {}",
        member.id, member.name, member.is_musician
    );

    // Registration logs the new member straight in
    let opened = match open_session(&state.db, &member).await {
        Ok(row) => row,
        Err(e) => {
            error!("Failed to open session for '{}': {}", member.name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while registering".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    let response = ApiResponse {
        data: SessionResponse {
            token: opened.token,
            user: UserResponse::from(member),
        },
        message: "Registration successful".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with name and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<SessionResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unknown name or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<LoginRequest>>,
) -> Result<Json<ApiResponse<SessionResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering login function");
    debug!("Login attempt for '{}'", request.name);

    // Unknown names and wrong passwords answer identically
    let member = match User::find()
        .filter(user::Column::Name.eq(request.name.clone()))
        .one(&state.db)
        .await
    {
        Ok(Some(member)) => member,
        Ok(None) => {
            warn!("Login failed for '{}': unknown name", request.name);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid name or password".to_string(),
                    code: "INVALID_CREDENTIALS".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Failed to look up '{}' for login: {}", request.name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while logging in".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    match identity::verify_password(&request.password, &member.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Login failed for '{}': wrong password", request.name);
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid name or password".to_string(),
                    code: "INVALID_CREDENTIALS".to_string(),
                    success: false,
                }),
            ));
        }
        Err(e) => {
            error!("Stored hash for '{}' is unreadable: {}", member.name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while logging in".to_string(),
                    code: "PASSWORD_HASH_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    }

    let opened = match open_session(&state.db, &member).await {
        Ok(row) => row,
        Err(e) => {
            error!("Failed to open session for '{}': {}", member.name, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while logging in".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    info!("Member '{}' logged in (session ID: {})", member.name, opened.id);
    let response = ApiResponse {
        data: SessionResponse {
            token: opened.token,
            user: UserResponse::from(member),
        },
        message: "Login successful".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Log out the presented bearer token
///
/// Always answers 200: logging out without a token, or with a token that no
/// session knows, is a no-op. A matched session keeps its row and user link;
/// only the logged-in flag comes down, after which the token no longer
/// resolves to an identity.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out (or nothing to log out)", body = ApiResponse<String>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering logout function");

    let Some(token) = identity::bearer_token(&headers) else {
        debug!("Logout without a bearer token is a no-op");
        return Ok(Json(logout_response()));
    };

    let session_row = match Session::find()
        .filter(session::Column::Token.eq(token))
        .one(&state.db)
        .await
    {
        Ok(Some(row)) => row,
        Ok(None) => {
            debug!("Logout token does not match any session");
            return Ok(Json(logout_response()));
        }
        Err(e) => {
            error!("Failed to look up session for logout: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while logging out".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ));
        }
    };

    // The row and its user_id survive; only the flag comes down
    let mut active: session::ActiveModel = session_row.into();
    active.logged_in = Set(false);
    match active.update(&state.db).await {
        Ok(row) => {
            info!("Session ID {} logged out", row.id);
            Ok(Json(logout_response()))
        }
        Err(e) => {
            error!("Failed to log session out: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error while logging out".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Insert a live session row for `member` and hand it back.
async fn open_session(db: &DatabaseConnection, member: &user::Model) -> Result<session::Model, DbErr> {
    session::ActiveModel {
        token: Set(identity::mint_session_token()),
        user_id: Set(member.id),
        logged_in: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

fn logout_response() -> ApiResponse<String> {
    ApiResponse {
        data: "logged out".to_string(),
        message: "Logout successful".to_string(),
        success: true,
    }
}
