use arc_swap::ArcSwap;
use async_trait::async_trait;
use cdnsight_application::ports::{BlocklistCachePort, BlocklistFeed};
use cdnsight_domain::{BlocklistSnapshot, DomainError, SnapshotStats};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

/// In-memory blocklist. Readers load the current snapshot lock-free; a
/// refresh builds a complete replacement and swaps it in one store, so a
/// lookup never sees a half-built index.
pub struct BlocklistCache {
    snapshot: ArcSwap<BlocklistSnapshot>,
    feed: Arc<dyn BlocklistFeed>,
}

impl BlocklistCache {
    pub fn new(feed: Arc<dyn BlocklistFeed>) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(BlocklistSnapshot::empty()),
            feed,
        }
    }

    pub fn with_snapshot(feed: Arc<dyn BlocklistFeed>, snapshot: BlocklistSnapshot) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(snapshot),
            feed,
        }
    }
}

#[async_trait]
impl BlocklistCachePort for BlocklistCache {
    fn snapshot(&self) -> Arc<BlocklistSnapshot> {
        self.snapshot.load_full()
    }

    async fn refresh(&self) -> Result<SnapshotStats, DomainError> {
        info!(source = self.feed.source(), "Blocklist refresh started");

        let document = self.feed.fetch().await.map_err(|e| {
            error!(error = %e, "Blocklist refresh failed, keeping previous snapshot");
            e
        })?;

        let (snapshot, stats) = BlocklistSnapshot::from_document(&document, Utc::now());

        if stats.skipped_entries > 0 || stats.dropped_state_changes > 0 {
            warn!(
                skipped_entries = stats.skipped_entries,
                dropped_state_changes = stats.dropped_state_changes,
                "Blocklist feed contained unreadable items"
            );
        }

        self.snapshot.store(Arc::new(snapshot));

        info!(ips = stats.ips, records = stats.records, "Blocklist refresh completed");
        Ok(stats)
    }
}
