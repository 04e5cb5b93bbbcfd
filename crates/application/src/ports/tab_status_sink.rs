use async_trait::async_trait;
use cdnsight_domain::{DomainError, TabId, TabStatus};

/// Consumer of finalized tab status (storage, icon, popup bridge).
#[async_trait]
pub trait TabStatusSink: Send + Sync {
    async fn publish(&self, status: &TabStatus) -> Result<(), DomainError>;

    async fn remove(&self, tab_id: TabId) -> Result<(), DomainError>;
}
