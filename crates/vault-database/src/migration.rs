//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply any migrations the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
    })?;

    info!(migrations = MIGRATOR.iter().count(), "Database schema is up to date");
    Ok(())
}
