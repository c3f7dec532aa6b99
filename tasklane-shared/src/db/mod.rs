/// Database utilities
///
/// - `pool`: Connection pool construction with health checking
/// - `migrations`: Embedded schema migrations
/// - `seed`: Optional demo data for fresh development databases
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::db::migrations::run_migrations;
/// use tasklane_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod migrations;
pub mod pool;
pub mod seed;
