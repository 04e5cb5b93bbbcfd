use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Blocklist feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Invalid blocklist feed: {0}")]
    InvalidFeed(String),

    #[error("Resolution failed for {domain}: {reason}")]
    ResolutionFailed { domain: String, reason: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl DomainError {
    pub fn resolution_failed(domain: &str, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            domain: domain.to_string(),
            reason: reason.into(),
        }
    }
}
