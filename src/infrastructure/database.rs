use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Builds the shared PostgreSQL pool
///
/// The pool connects lazily: the first query opens the first connection, and
/// `acquire_timeout` bounds how long any caller waits for one. A store that
/// cannot be reached in that window surfaces as `PoolTimedOut`.
pub fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.database_connect_timeout)
        .connect_lazy(&config.database_url)
}

/// Applies the embedded migrations in `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
