#![allow(dead_code)]

use async_trait::async_trait;
use cdnsight_application::ports::BlocklistCachePort;
use cdnsight_domain::{BlocklistSnapshot, DomainError, SnapshotStats};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub struct MockBlocklistCache {
    refresh_count: Arc<AtomicU64>,
    should_fail: AtomicBool,
}

impl MockBlocklistCache {
    pub fn new() -> Self {
        Self {
            refresh_count: Arc::new(AtomicU64::new(0)),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let cache = Self::new();
        cache.should_fail.store(true, Ordering::SeqCst);
        cache
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistCachePort for MockBlocklistCache {
    fn snapshot(&self) -> Arc<BlocklistSnapshot> {
        Arc::new(BlocklistSnapshot::empty())
    }

    async fn refresh(&self) -> Result<SnapshotStats, DomainError> {
        self.refresh_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::FeedUnavailable("HTTP 503".to_string()));
        }
        Ok(SnapshotStats::default())
    }
}
