use cdnsight_application::ports::{AddressResolver, BlocklistCachePort};
use cdnsight_domain::Config;
use cdnsight_infrastructure::blocklist::{BlocklistCache, HttpBlocklistFeed};
use cdnsight_infrastructure::dns::FallbackResolver;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Services {
    pub resolver: Arc<dyn AddressResolver>,
    pub blocklist: Arc<dyn BlocklistCachePort>,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("cdnsight/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let resolver = FallbackResolver::from_config(&config.resolver, http_client.clone());
        info!(
            resolvers = resolver.len(),
            endpoints = ?config.resolver.endpoints,
            "DNS fallback chain configured"
        );

        let feed = HttpBlocklistFeed::new(
            config.feed.url.clone(),
            http_client,
            Duration::from_secs(config.feed.request_timeout_secs),
        );
        info!(url = %config.feed.url, "Blocklist feed configured");

        Ok(Self {
            resolver: Arc::new(resolver),
            blocklist: Arc::new(BlocklistCache::new(Arc::new(feed))),
        })
    }
}
