use cdnsight_domain::DomainError;
use cdnsight_infrastructure::repositories::SqliteTabStatusRepository;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

pub struct Repositories {
    pub tab_status: Option<Arc<SqliteTabStatusRepository>>,
}

impl Repositories {
    pub async fn new(pool: Option<SqlitePool>) -> Result<Self, DomainError> {
        let Some(pool) = pool else {
            return Ok(Self { tab_status: None });
        };

        let tab_status = SqliteTabStatusRepository::new(pool);
        let stale = tab_status.clear().await?;
        if stale > 0 {
            info!(rows = stale, "Dropped tab status left from a previous session");
        }

        Ok(Self {
            tab_status: Some(Arc::new(tab_status)),
        })
    }
}
