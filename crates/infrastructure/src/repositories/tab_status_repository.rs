use async_trait::async_trait;
use cdnsight_application::ports::TabStatusSink;
use cdnsight_domain::{DomainError, TabId, TabStatus};
use sqlx::{Row, SqlitePool};
use tracing::debug;

/// Last settled status of every open tab, one row per tab.
pub struct SqliteTabStatusRepository {
    pool: SqlitePool,
}

impl SqliteTabStatusRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, tab_id: TabId) -> Result<Option<TabStatus>, DomainError> {
        let row = sqlx::query("SELECT snapshot FROM tab_status WHERE tab_id = ?")
            .bind(tab_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        row.map(|row| decode_snapshot(row.get("snapshot"))).transpose()
    }

    pub async fn get_all(&self) -> Result<Vec<TabStatus>, DomainError> {
        let rows = sqlx::query("SELECT snapshot FROM tab_status ORDER BY tab_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|row| decode_snapshot(row.get("snapshot")))
            .collect()
    }

    /// Tab ids do not survive a browser restart; rows left from an earlier
    /// session are dropped on startup.
    pub async fn clear(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM tab_status")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TabStatusSink for SqliteTabStatusRepository {
    async fn publish(&self, status: &TabStatus) -> Result<(), DomainError> {
        let snapshot = serde_json::to_string(status)
            .map_err(|e| DomainError::DatabaseError(format!("encode tab status: {}", e)))?;

        sqlx::query(
            "INSERT INTO tab_status (tab_id, indicator, uses_cdn, origin_ip, verdict, snapshot, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(tab_id) DO UPDATE SET
                indicator = excluded.indicator,
                uses_cdn = excluded.uses_cdn,
                origin_ip = excluded.origin_ip,
                verdict = excluded.verdict,
                snapshot = excluded.snapshot,
                updated_at = excluded.updated_at",
        )
        .bind(status.tab_id)
        .bind(status.indicator.as_str())
        .bind(status.state.uses_cdn)
        .bind(status.state.origin_ip.as_deref())
        .bind(status.state.block_status.as_str())
        .bind(&snapshot)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        debug!(tab_id = status.tab_id, indicator = %status.indicator, "Tab status stored");
        Ok(())
    }

    async fn remove(&self, tab_id: TabId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM tab_status WHERE tab_id = ?")
            .bind(tab_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

fn decode_snapshot(raw: String) -> Result<TabStatus, DomainError> {
    serde_json::from_str(&raw)
        .map_err(|e| DomainError::DatabaseError(format!("decode tab status: {}", e)))
}
