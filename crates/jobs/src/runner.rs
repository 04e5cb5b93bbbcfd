use crate::BlocklistSyncJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct JobRunner {
    blocklist_sync: Option<BlocklistSyncJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            blocklist_sync: None,
            shutdown: None,
        }
    }

    pub fn with_blocklist_sync(mut self, job: BlocklistSyncJob) -> Self {
        self.blocklist_sync = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job and returns their handles.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");
        let mut handles = Vec::new();

        if let Some(job) = self.blocklist_sync {
            let job = match &self.shutdown {
                Some(token) => job.with_cancellation(token.clone()),
                None => job,
            };
            handles.push(Arc::new(job).start().await);
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
