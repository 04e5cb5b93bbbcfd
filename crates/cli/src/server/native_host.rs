//! Native-messaging host loop.
//!
//! Inbound frames are decoded and dispatched to the tab coordinator. Page
//! loads run as their own tasks so header events for the same tab keep being
//! applied while a navigation waits on its header join or on DNS. Every
//! outbound message goes through one channel to a single stdout writer.

use super::codec::{read_frame, write_frame, Frame};
use super::messages::{InboundMessage, OutboundMessage};
use async_trait::async_trait;
use cdnsight_application::ports::TabStatusSink;
use cdnsight_application::use_cases::TabCoordinator;
use cdnsight_domain::{DomainError, TabId, TabState, TabStatus};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Forwards finalized tab status to the extension.
pub struct NativeHostSink {
    outbound: mpsc::Sender<OutboundMessage>,
}

impl NativeHostSink {
    pub fn new(outbound: mpsc::Sender<OutboundMessage>) -> Self {
        Self { outbound }
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), DomainError> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| DomainError::ProtocolError("host output closed".to_string()))
    }
}

#[async_trait]
impl TabStatusSink for NativeHostSink {
    async fn publish(&self, status: &TabStatus) -> Result<(), DomainError> {
        self.send(OutboundMessage::Status(status.clone())).await
    }

    async fn remove(&self, tab_id: TabId) -> Result<(), DomainError> {
        self.send(OutboundMessage::Removed { tab_id }).await
    }
}

pub struct NativeHost {
    coordinator: Arc<TabCoordinator>,
    outbound: mpsc::Sender<OutboundMessage>,
}

impl NativeHost {
    pub fn new(coordinator: Arc<TabCoordinator>, outbound: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            coordinator,
            outbound,
        }
    }

    /// Runs until the input stream ends. Pending page loads are allowed to
    /// finish and every queued message is written before returning.
    pub async fn serve<R, W>(
        self,
        mut reader: R,
        writer: W,
        outbound_rx: mpsc::Receiver<OutboundMessage>,
    ) -> Result<(), DomainError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        info!("Native host listening");
        let writer_task = tokio::spawn(write_loop(writer, outbound_rx));
        let mut in_flight = JoinSet::new();

        let outcome = loop {
            match read_frame(&mut reader).await {
                Ok(Some(Frame::Message(payload))) => self.dispatch(&payload, &mut in_flight).await,
                Ok(Some(Frame::Oversized(len))) => {
                    warn!(error = %DomainError::ProtocolError(format!("{} byte frame", len)), "Dropping oversized frame");
                }
                Ok(None) => {
                    info!("Input closed");
                    break Ok(());
                }
                Err(e) => break Err(DomainError::ProtocolError(format!("read failed: {}", e))),
            }

            while let Some(joined) = in_flight.try_join_next() {
                log_join(joined);
            }
        };

        while let Some(joined) = in_flight.join_next().await {
            log_join(joined);
        }

        // Dropping the last senders lets the writer drain and stop.
        drop(self);
        match writer_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Output writer failed"),
            Err(e) => warn!(error = %e, "Output writer panicked"),
        }

        outcome
    }

    async fn dispatch(&self, payload: &[u8], in_flight: &mut JoinSet<()>) {
        let message = match serde_json::from_slice::<InboundMessage>(payload) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %DomainError::ProtocolError(e.to_string()), "Skipping malformed message");
                return;
            }
        };

        match message {
            InboundMessage::TabCreated { tab_id } => self.coordinator.on_tab_created(tab_id),
            InboundMessage::TabRemoved { tab_id } => self.coordinator.on_tab_removed(tab_id).await,
            InboundMessage::HeadersReceived(event) => self.coordinator.on_headers_received(&event),
            InboundMessage::PageLoad(event) => {
                // The navigation slot is claimed before the next frame is read.
                let Some(pending) = self.coordinator.begin_page_load(&event) else {
                    return;
                };
                let coordinator = self.coordinator.clone();
                in_flight.spawn(async move {
                    coordinator.finish_page_load(pending).await;
                });
            }
            InboundMessage::Query { tab_id } => {
                let status = self
                    .coordinator
                    .status(tab_id)
                    .unwrap_or_else(|| TabStatus::new(tab_id, TabState::default()));
                if self.outbound.send(OutboundMessage::Status(status)).await.is_err() {
                    warn!(tab_id, "Dropping query reply, output closed");
                }
            }
        }
    }
}

async fn write_loop<W>(mut writer: W, mut outbound_rx: mpsc::Receiver<OutboundMessage>) -> Result<(), DomainError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = outbound_rx.recv().await {
        let payload = serde_json::to_vec(&message)
            .map_err(|e| DomainError::ProtocolError(format!("encode failed: {}", e)))?;
        if let Err(e) = write_frame(&mut writer, &payload).await {
            // An unwritable message is dropped; a closed pipe ends the loop.
            if e.kind() == std::io::ErrorKind::InvalidInput {
                warn!(error = %e, "Dropping outbound message");
                continue;
            }
            return Err(DomainError::ProtocolError(format!("write failed: {}", e)));
        }
        debug!(bytes = payload.len(), "Message sent");
    }
    Ok(())
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        warn!(error = %e, "Page load task failed");
    }
}
