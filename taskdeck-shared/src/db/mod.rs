/// Database layer for Taskdeck
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management
/// - `migrations`: Database migration runner
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config)?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
