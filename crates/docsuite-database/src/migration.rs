//! Embedded sqlx migrations, applied at startup before the server binds.

use sqlx::PgPool;
use tracing::info;

use docsuite_core::error::{AppError, ErrorKind};

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "migration run failed", e))?;
    info!("schema migrations applied");
    Ok(())
}
