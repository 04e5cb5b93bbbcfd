//! Wire shape of the remote blocklist feed.
//!
//! ```json
//! { "data": [ { "ip": "1.2.3.4", "isp": "ISP-A", "description": "...",
//!               "stateChanges": [ { "timestamp": "...", "state": true } ] } ] }
//! ```
//!
//! Timestamps arrive either as RFC 3339 strings or as Unix epoch
//! milliseconds, integral or fractional.
//!
//! Entries are decoded one at a time: an entry whose shape cannot be read is
//! counted in [`FeedDocument::rejected_entries`] and the rest of the feed is
//! kept. Only a body that is not a feed object at all is an error.

use crate::provider_record::{ProviderRecord, StateChange};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub data: Vec<FeedEntry>,
    pub rejected_entries: usize,
}

#[derive(Deserialize)]
struct RawFeedDocument {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedEntry {
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub isp: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "stateChanges")]
    pub state_changes: Vec<FeedStateChange>,
}

/// A change with a missing timestamp or a `null` state is kept here and
/// dropped when the entry becomes a [`ProviderRecord`].
#[derive(Debug, Clone, Deserialize)]
pub struct FeedStateChange {
    #[serde(default)]
    pub timestamp: Option<FeedTimestamp>,
    #[serde(default)]
    pub state: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedTimestamp {
    EpochMillis(i64),
    FractionalMillis(f64),
    Text(String),
}

impl FeedTimestamp {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FeedTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms),
            FeedTimestamp::FractionalMillis(ms) => fractional_millis(*ms),
            FeedTimestamp::Text(text) => {
                let text = text.trim();
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(parsed.with_timezone(&Utc));
                }
                text.parse::<f64>().ok().and_then(fractional_millis)
            }
        }
    }
}

fn fractional_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

impl FeedDocument {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let raw: RawFeedDocument = serde_json::from_str(body)?;

        let mut document = FeedDocument {
            data: Vec::with_capacity(raw.data.len()),
            rejected_entries: 0,
        };
        for value in raw.data {
            match serde_json::from_value::<FeedEntry>(value) {
                Ok(entry) => document.data.push(entry),
                Err(_) => document.rejected_entries += 1,
            }
        }
        Ok(document)
    }
}

impl FeedEntry {
    /// Converts the entry into a provider record, dropping state changes
    /// whose timestamp or state cannot be read. Returns the record and the
    /// number of dropped changes.
    pub fn to_provider_record(&self) -> (ProviderRecord, usize) {
        let mut dropped = 0;
        let state_changes = self
            .state_changes
            .iter()
            .filter_map(|change| {
                let timestamp = change.timestamp.as_ref().and_then(FeedTimestamp::to_datetime);
                match (timestamp, change.state) {
                    (Some(timestamp), Some(blocked)) => Some(StateChange::new(timestamp, blocked)),
                    _ => {
                        dropped += 1;
                        None
                    }
                }
            })
            .collect();

        (
            ProviderRecord::new(
                self.isp.trim(),
                self.description.as_str(),
                state_changes,
            ),
            dropped,
        )
    }
}
