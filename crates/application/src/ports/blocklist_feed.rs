use async_trait::async_trait;
use cdnsight_domain::{DomainError, FeedDocument};

#[async_trait]
pub trait BlocklistFeed: Send + Sync {
    /// Fetches and parses the whole feed. Network failures and non-success
    /// responses are `DomainError::FeedUnavailable`.
    async fn fetch(&self) -> Result<FeedDocument, DomainError>;

    fn source(&self) -> &str;
}
