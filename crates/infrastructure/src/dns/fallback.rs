use async_trait::async_trait;
use cdnsight_application::ports::AddressResolver;
use cdnsight_domain::config::ResolverConfig;
use cdnsight_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::doh_json::DohJsonResolver;

/// Tries each resolver in order and returns the first answer. A failing
/// resolver is logged and skipped; only exhaustion is an error.
pub struct FallbackResolver {
    resolvers: Vec<Arc<dyn AddressResolver>>,
}

impl FallbackResolver {
    pub fn new(resolvers: Vec<Arc<dyn AddressResolver>>) -> Self {
        Self { resolvers }
    }

    pub fn from_config(config: &ResolverConfig, client: reqwest::Client) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let resolvers = config
            .endpoints
            .iter()
            .map(|endpoint| {
                Arc::new(DohJsonResolver::new(endpoint.clone(), client.clone(), timeout))
                    as Arc<dyn AddressResolver>
            })
            .collect();
        Self::new(resolvers)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

#[async_trait]
impl AddressResolver for FallbackResolver {
    async fn resolve_a(&self, domain: &str) -> Result<IpAddr, DomainError> {
        debug!(strategy = "fallback", resolvers = self.resolvers.len(), domain = %domain, "Trying sequentially");

        for (position, resolver) in self.resolvers.iter().enumerate() {
            match resolver.resolve_a(domain).await {
                Ok(ip) => {
                    debug!(resolver = resolver.name(), position, ip = %ip, "Resolver answered");
                    return Ok(ip);
                }
                Err(e) => {
                    warn!(resolver = resolver.name(), error = %e, position, "Falling back");
                }
            }
        }

        Err(DomainError::resolution_failed(
            domain,
            format!("all {} resolvers failed", self.resolvers.len()),
        ))
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
