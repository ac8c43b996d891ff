use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const MAX_CONNECTIONS: u32 = 10;

/// Creates a PostgreSQL connection pool, verifying connectivity up front.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// A pool that defers connecting until first use. Router tests exercise
/// database-free endpoints with this; nothing is dialed unless a handler
/// actually queries. The short acquire timeout keeps tests that do reach
/// the database from waiting out the pool's default.
#[cfg(test)]
pub fn lazy_pool(database_url: &str) -> Result<PgPool> {
    use std::time::Duration;

    Ok(PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy(database_url)?)
}
