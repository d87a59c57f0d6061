use migration::{Migrator, MigratorTrait};
use order_tracker::{build_router, AppState};
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Set up test database connection with the schema applied
/// Uses TEST_DATABASE_URL environment variable or falls back to in-memory SQLite
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let database_url =
        env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

    let db = Database::connect(&database_url).await?;
    Migrator::refresh(&db).await?;
    Ok(db)
}

pub async fn build_test_router() -> axum::Router {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    build_router(AppState { db })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database connection should succeed");
    }
}
