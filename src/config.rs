use crate::schemas::AppState;
use anyhow::Result;
use sea_orm::Database;

/// Build the shared application state around a live database connection
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState { db })
}
