use serde::{Deserialize, Serialize};

/// Upper bound on fallback resolvers tried per lookup.
pub const MAX_RESOLVER_ENDPOINTS: usize = 3;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// DNS-over-HTTPS JSON endpoints, tried in this order.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://cloudflare-dns.com/dns-query".to_string(),
        "https://dns.google/resolve".to_string(),
        "https://dns.quad9.net:5053/dns-query".to_string(),
    ]
}

fn default_request_timeout_secs() -> u64 {
    5
}
