use crate::provider_record::ProviderRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tri-state classification of a tab's origin IP against the blocklist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockVerdict {
    #[default]
    Clean,
    Listed(ListedDetail),
    Blocked(BlockedDetail),
}

/// Per-provider view of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub provider: Arc<str>,
    /// Latest reported state; `None` when the provider has no history.
    pub blocked: Option<bool>,
    pub changed_at: Option<DateTime<Utc>>,
    pub last_blocked_at: Option<DateTime<Utc>>,
    pub description: Arc<str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListedDetail {
    pub providers: Vec<ProviderStatus>,
    pub last_blocked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDetail {
    pub blocked_by: Vec<ProviderStatus>,
    pub previously_listed: Vec<ProviderStatus>,
}

impl ProviderStatus {
    pub fn from_record(record: &ProviderRecord) -> Self {
        let latest = record.latest();
        Self {
            provider: Arc::clone(&record.provider_name),
            blocked: latest.map(|change| change.blocked),
            changed_at: latest.map(|change| change.timestamp),
            last_blocked_at: record.last_blocked_at(),
            description: Arc::clone(&record.description),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.blocked == Some(true)
    }
}

impl BlockVerdict {
    pub fn is_clean(&self) -> bool {
        matches!(self, BlockVerdict::Clean)
    }

    pub fn is_listed(&self) -> bool {
        matches!(self, BlockVerdict::Listed(_))
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, BlockVerdict::Blocked(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockVerdict::Clean => "clean",
            BlockVerdict::Listed(_) => "listed",
            BlockVerdict::Blocked(_) => "blocked",
        }
    }

    /// Names of providers currently blocking; empty unless `Blocked`.
    pub fn blocked_by(&self) -> Vec<&str> {
        match self {
            BlockVerdict::Blocked(detail) => {
                detail.blocked_by.iter().map(|p| &*p.provider).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Display for BlockVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
