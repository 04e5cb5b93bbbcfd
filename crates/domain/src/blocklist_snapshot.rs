use crate::feed::{FeedDocument, FeedEntry};
use crate::provider_record::ProviderRecord;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

/// Immutable view of the blocklist feed at one point in time.
///
/// `ip_index` is always exactly the key set of `records_by_ip`; both are built
/// together in [`BlocklistSnapshot::from_entries`] and never mutated after.
#[derive(Debug, Clone, Default)]
pub struct BlocklistSnapshot {
    ip_index: HashSet<String>,
    records_by_ip: HashMap<String, Vec<ProviderRecord>>,
    last_refreshed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotStats {
    pub ips: usize,
    pub records: usize,
    pub skipped_entries: usize,
    pub dropped_state_changes: usize,
}

/// Canonical lookup key for an IP string.
///
/// Parseable addresses are re-rendered so `2001:DB8::1` and `2001:db8:0::1`
/// share a key; anything else is trimmed and lowercased.
pub fn normalize_ip(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<IpAddr>() {
        Ok(ip) => Some(ip.to_string()),
        Err(_) => Some(trimmed.to_ascii_lowercase()),
    }
}

impl BlocklistSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a whole feed. Entries the feed parser already
    /// rejected count as skipped.
    pub fn from_document(document: &FeedDocument, refreshed_at: DateTime<Utc>) -> (Self, SnapshotStats) {
        let (snapshot, mut stats) = Self::from_entries(&document.data, refreshed_at);
        stats.skipped_entries += document.rejected_entries;
        (snapshot, stats)
    }

    /// Groups feed entries by IP, keeping feed order for records of the same IP.
    pub fn from_entries(entries: &[FeedEntry], refreshed_at: DateTime<Utc>) -> (Self, SnapshotStats) {
        let mut stats = SnapshotStats::default();
        let mut records_by_ip: HashMap<String, Vec<ProviderRecord>> = HashMap::new();

        for entry in entries {
            let Some(key) = normalize_ip(&entry.ip) else {
                stats.skipped_entries += 1;
                continue;
            };
            let (record, dropped) = entry.to_provider_record();
            stats.dropped_state_changes += dropped;
            stats.records += 1;
            records_by_ip.entry(key).or_default().push(record);
        }

        let ip_index: HashSet<String> = records_by_ip.keys().cloned().collect();
        stats.ips = ip_index.len();

        (
            Self {
                ip_index,
                records_by_ip,
                last_refreshed: Some(refreshed_at),
            },
            stats,
        )
    }

    /// Exact, case-insensitive membership test.
    pub fn lookup(&self, ip: &str) -> bool {
        normalize_ip(ip).is_some_and(|key| self.ip_index.contains(&key))
    }

    pub fn records(&self, ip: &str) -> &[ProviderRecord] {
        normalize_ip(ip)
            .and_then(|key| self.records_by_ip.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.ip_index.is_empty()
    }

    pub fn ip_count(&self) -> usize {
        self.ip_index.len()
    }

    pub fn record_count(&self) -> usize {
        self.records_by_ip.values().map(Vec::len).sum()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }
}
