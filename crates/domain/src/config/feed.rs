use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str = "https://hayahora.futbol/estado/data.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_feed_url() -> String {
    DEFAULT_FEED_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}
