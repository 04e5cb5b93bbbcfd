use async_trait::async_trait;
use cdnsight_application::ports::BlocklistFeed;
use cdnsight_domain::{DomainError, FeedDocument};
use std::time::Duration;
use tracing::debug;

/// Pulls the blocklist JSON document over HTTP(S).
pub struct HttpBlocklistFeed {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBlocklistFeed {
    pub fn new(url: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            client,
            timeout,
        }
    }

    async fn fetch_body(&self) -> Result<String, DomainError> {
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::FeedUnavailable(format!("fetch error for {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::FeedUnavailable(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                self.url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::FeedUnavailable(format!("read error for {}: {}", self.url, e)))
    }
}

#[async_trait]
impl BlocklistFeed for HttpBlocklistFeed {
    async fn fetch(&self) -> Result<FeedDocument, DomainError> {
        let body = self.fetch_body().await?;
        debug!(url = %self.url, bytes = body.len(), "Blocklist feed downloaded");
        FeedDocument::from_json(&body)
            .map_err(|e| DomainError::InvalidFeed(format!("{}: {}", self.url, e)))
    }

    fn source(&self) -> &str {
        &self.url
    }
}
