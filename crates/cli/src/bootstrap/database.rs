use cdnsight_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(database_url: &str) -> anyhow::Result<SqlitePool> {
    info!(database_url, "Initializing database");

    let pool = create_pool(database_url).await.map_err(|e| {
        error!(error = %e, "Failed to initialize database");
        anyhow::anyhow!(e)
    })?;

    info!("Database initialized successfully");
    Ok(pool)
}
