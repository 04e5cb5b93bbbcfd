use async_trait::async_trait;
use cdnsight_domain::{BlocklistSnapshot, DomainError, ProviderRecord, SnapshotStats};
use std::sync::Arc;

#[async_trait]
pub trait BlocklistCachePort: Send + Sync {
    /// Current snapshot; callers keep it for as long as they need a
    /// consistent view.
    fn snapshot(&self) -> Arc<BlocklistSnapshot>;

    /// Replaces the snapshot on success; leaves it untouched on failure.
    async fn refresh(&self) -> Result<SnapshotStats, DomainError>;

    fn lookup(&self, ip: &str) -> bool {
        self.snapshot().lookup(ip)
    }

    fn records(&self, ip: &str) -> Vec<ProviderRecord> {
        self.snapshot().records(ip).to_vec()
    }
}
