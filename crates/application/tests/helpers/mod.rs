#![allow(dead_code)]

use async_trait::async_trait;
use cdnsight_application::ports::{AddressResolver, BlocklistCachePort, TabStatusSink};
use cdnsight_domain::{
    BlocklistSnapshot, DomainError, FeedDocument, SnapshotStats, TabId, TabStatus,
};
use chrono::Utc;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn snapshot_from_json(body: &str) -> BlocklistSnapshot {
    let doc = FeedDocument::from_json(body).unwrap();
    BlocklistSnapshot::from_entries(&doc.data, Utc::now()).0
}

pub struct MockAddressResolver {
    answers: Mutex<HashMap<String, IpAddr>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: AtomicUsize,
}

impl MockAddressResolver {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_answer(self, domain: &str, ip: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(domain.to_string(), ip.parse().unwrap());
        self
    }

    pub fn with_delay(self, domain: &str, delay: Duration) -> Self {
        self.delays
            .lock()
            .unwrap()
            .insert(domain.to_string(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressResolver for MockAddressResolver {
    async fn resolve_a(&self, domain: &str) -> Result<IpAddr, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().get(domain).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let answer = self.answers.lock().unwrap().get(domain).copied();
        answer.ok_or_else(|| DomainError::resolution_failed(domain, "no answer"))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

pub struct MockBlocklistCache {
    snapshot: Arc<BlocklistSnapshot>,
    reads: AtomicUsize,
}

impl MockBlocklistCache {
    pub fn new(snapshot: BlocklistSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(BlocklistSnapshot::empty())
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistCachePort for MockBlocklistCache {
    fn snapshot(&self) -> Arc<BlocklistSnapshot> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Arc::clone(&self.snapshot)
    }

    async fn refresh(&self) -> Result<SnapshotStats, DomainError> {
        Err(DomainError::FeedUnavailable("mock".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<TabStatus>>,
    removed: Mutex<Vec<TabId>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<TabStatus> {
        self.published.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<TabId> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl TabStatusSink for RecordingSink {
    async fn publish(&self, status: &TabStatus) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::DatabaseError("disk full".to_string()));
        }
        self.published.lock().unwrap().push(status.clone());
        Ok(())
    }

    async fn remove(&self, tab_id: TabId) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::DatabaseError("disk full".to_string()));
        }
        self.removed.lock().unwrap().push(tab_id);
        Ok(())
    }
}
