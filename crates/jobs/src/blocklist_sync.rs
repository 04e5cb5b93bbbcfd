use cdnsight_application::ports::BlocklistCachePort;
use cdnsight_domain::config::BLOCKLIST_REFRESH_INTERVAL;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Keeps the blocklist cache fresh.
///
/// The first tick fires immediately so the cache is populated at startup;
/// later ticks follow `interval`. A failed refresh leaves the previous
/// snapshot in place and waits for the next tick, there is no retry.
pub struct BlocklistSyncJob {
    cache: Arc<dyn BlocklistCachePort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl BlocklistSyncJob {
    pub fn new(cache: Arc<dyn BlocklistCachePort>) -> Self {
        Self {
            cache,
            interval: BLOCKLIST_REFRESH_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting blocklist sync job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlocklistSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.cache.refresh().await {
                            Ok(stats) => info!(
                                ips = stats.ips,
                                records = stats.records,
                                "BlocklistSyncJob: refresh completed"
                            ),
                            Err(e) => warn!(error = %e, "BlocklistSyncJob: refresh failed, serving stale snapshot"),
                        }
                    }
                }
            }
        })
    }
}
