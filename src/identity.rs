use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::http::{header, HeaderMap};
use model::entities::prelude::{Session, User};
use model::entities::{session, user};
use rand::RngCore;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors from credential handling and token resolution.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;

/// Who is making the request.
///
/// `Anonymous` is a value, not an error: open operations accept it and gated
/// ones turn it into 401. Every gated handler branches on this explicitly.
#[derive(Clone, Debug)]
pub enum Identity {
    /// A verified, logged-in member.
    Known(user::Model),
    /// No usable bearer token came with the request.
    Anonymous,
}

/// Resolve the bearer token in `headers` to a request identity.
///
/// A missing header, an unknown token, and a logged-out session all come
/// back as `Anonymous`. Only database faults are errors.
pub async fn resolve_identity(db: &DatabaseConnection, headers: &HeaderMap) -> Result<Identity> {
    trace!("Resolving request identity");

    let Some(token) = bearer_token(headers) else {
        debug!("No bearer token presented");
        return Ok(Identity::Anonymous);
    };

    // logged_in = false is authoritative, whatever else the row says
    let Some(session_row) = Session::find()
        .filter(session::Column::Token.eq(token))
        .filter(session::Column::LoggedIn.eq(true))
        .one(db)
        .await?
    else {
        debug!("Bearer token does not match a live session");
        return Ok(Identity::Anonymous);
    };

    match User::find_by_id(session_row.user_id).one(db).await? {
        Some(member) => {
            trace!("Token resolved to member ID: {}", member.id);
            Ok(Identity::Known(member))
        }
        None => {
            warn!("Session {} references a missing user", session_row.id);
            Ok(Identity::Anonymous)
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Mint an opaque session token: 32 random bytes, hex-encoded.
pub fn mint_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a clear-text password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| IdentityError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a candidate password against a stored PHC string.
///
/// A malformed stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| IdentityError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
