/// Database migration runner
///
/// Migrations live in the `migrations/` directory at the workspace root and
/// are embedded at compile time via `sqlx::migrate!`. Each migration is a
/// `{version}_{name}.up.sql` file with a matching `.down.sql` rollback.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskdeck_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config)?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

use sqlx::postgres::PgPool;
use tracing::info;

/// Runs all pending database migrations
///
/// Already-applied migrations are skipped; each pending migration runs in
/// its own transaction where the statements allow it.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the database is
/// unreachable.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    sqlx::migrate!("../migrations").run(pool).await?;

    info!("Database migrations up to date");
    Ok(())
}
