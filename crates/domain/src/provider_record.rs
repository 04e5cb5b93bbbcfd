use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A timestamped blocked/unblocked transition reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub timestamp: DateTime<Utc>,
    pub blocked: bool,
}

impl StateChange {
    pub fn new(timestamp: DateTime<Utc>, blocked: bool) -> Self {
        Self { timestamp, blocked }
    }
}

/// One network operator's block history for a listed IP.
///
/// `state_changes` keeps the order the feed reported them in. The last
/// element is the provider's current state; an empty history means the IP is
/// listed but the verdict is indeterminate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub provider_name: Arc<str>,
    pub description: Arc<str>,
    pub state_changes: Vec<StateChange>,
}

impl ProviderRecord {
    pub fn new(
        provider_name: impl Into<Arc<str>>,
        description: impl Into<Arc<str>>,
        state_changes: Vec<StateChange>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            description: description.into(),
            state_changes,
        }
    }

    pub fn latest(&self) -> Option<&StateChange> {
        self.state_changes.last()
    }

    /// `None` when the provider never reported a state.
    pub fn is_currently_blocking(&self) -> Option<bool> {
        self.latest().map(|change| change.blocked)
    }

    /// Most recent transition into the blocked state, if any.
    pub fn last_blocked_at(&self) -> Option<DateTime<Utc>> {
        self.state_changes
            .iter()
            .filter(|change| change.blocked)
            .map(|change| change.timestamp)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_latest_follows_feed_order() {
        let record = ProviderRecord::new(
            "ISP-A",
            "",
            vec![StateChange::new(ts(200), false), StateChange::new(ts(100), true)],
        );

        assert_eq!(record.is_currently_blocking(), Some(true));
        assert_eq!(record.last_blocked_at(), Some(ts(100)));
    }

    #[test]
    fn test_empty_history_is_indeterminate() {
        let record = ProviderRecord::new("ISP-A", "", vec![]);
        assert_eq!(record.is_currently_blocking(), None);
        assert_eq!(record.last_blocked_at(), None);
    }
}
