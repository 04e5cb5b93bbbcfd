use super::store::{NavigationTicket, TabStateStore};
use super::web_target::WebTarget;
use crate::ports::{AddressResolver, BlocklistCachePort, TabStatusSink};
use crate::services::StatusEvaluator;
use cdnsight_domain::config::HEADER_GRACE_PERIOD;
use cdnsight_domain::{
    CdnClassifier, DomainError, HeadersReceived, PageLoad, TabId, TabState,
    TabStatus,
};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Owns the per-tab state table and reconciles header, navigation and tab
/// lifecycle events into one status per tab.
pub struct TabCoordinator {
    store: TabStateStore,
    resolver: Arc<dyn AddressResolver>,
    blocklist: Arc<dyn BlocklistCachePort>,
    sinks: Vec<Arc<dyn TabStatusSink>>,
    grace_period: Duration,
    /// Held while talking to sinks so a removal is never followed by a
    /// status for the same tab.
    sink_order: Mutex<()>,
}

/// A completed navigation whose slot is claimed but not yet settled.
#[derive(Debug)]
pub struct PendingNavigation {
    ticket: NavigationTicket,
    target: Option<WebTarget>,
}

impl PendingNavigation {
    pub fn tab_id(&self) -> TabId {
        self.ticket.tab_id
    }
}

impl TabCoordinator {
    pub fn new(resolver: Arc<dyn AddressResolver>, blocklist: Arc<dyn BlocklistCachePort>) -> Self {
        Self {
            store: TabStateStore::new(),
            resolver,
            blocklist,
            sinks: Vec::new(),
            grace_period: HEADER_GRACE_PERIOD,
            sink_order: Mutex::new(()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn TabStatusSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    pub fn on_tab_created(&self, tab_id: TabId) {
        debug!(tab_id, "Tab created");
        self.store.reset(tab_id);
    }

    pub async fn on_tab_removed(&self, tab_id: TabId) {
        let _order = self.sink_order.lock().await;
        let existed = self.store.remove(tab_id);
        debug!(tab_id, existed, "Tab removed");

        for sink in &self.sinks {
            if let Err(e) = sink.remove(tab_id).await {
                warn!(error = %e, tab_id, "Failed to drop tab status");
            }
        }
    }

    /// Main-document response metadata. Updates the header-derived fields only.
    pub fn on_headers_received(&self, event: &HeadersReceived) {
        let signals = CdnClassifier::classify_headers(&event.response_headers);

        let origin_ip = match event.remote_ip.as_deref().map(parse_remote_ip) {
            Some(Ok(ip)) => Some(ip),
            Some(Err(e)) => {
                debug!(error = %e, tab_id = event.tab_id, "Ignoring remote IP");
                None
            }
            None => None,
        };

        debug!(
            tab_id = event.tab_id,
            uses_cdn = signals.uses_cdn,
            origin_ip = origin_ip.as_deref().unwrap_or("-"),
            "Headers received"
        );
        self.store.apply_headers(event.tab_id, signals, origin_ip);
    }

    /// Page-load signal. Only a completed navigation settles the tab; the
    /// returned status is `None` when nothing was committed (still loading,
    /// tab closed meanwhile, or superseded by a newer navigation).
    pub async fn on_page_load(&self, event: &PageLoad) -> Option<TabStatus> {
        let pending = self.begin_page_load(event)?;
        self.finish_page_load(pending).await
    }

    /// Claims the navigation slot for `event` without awaiting anything, so
    /// events handled after this call are ordered after the navigation.
    pub fn begin_page_load(&self, event: &PageLoad) -> Option<PendingNavigation> {
        if !event.navigation_complete {
            return None;
        }

        let target = match WebTarget::parse(&event.url) {
            Ok(target) => target,
            Err(e) => {
                debug!(error = %e, tab_id = event.tab_id, "Treating URL as non-web");
                None
            }
        };

        Some(PendingNavigation {
            ticket: self.store.begin_navigation(event.tab_id),
            target,
        })
    }

    /// Joins the header signal, resolves the origin when needed and commits
    /// the verdict for a navigation claimed by [`Self::begin_page_load`].
    pub async fn finish_page_load(&self, pending: PendingNavigation) -> Option<TabStatus> {
        let PendingNavigation { mut ticket, target } = pending;
        let tab_id = ticket.tab_id;

        let Some(target) = target else {
            let state = self
                .store
                .commit(&ticket, |state| *state = TabState::default())?;
            return self.publish(&ticket, state).await;
        };

        self.join_headers(&mut ticket).await;
        if !self.store.is_current(&ticket) {
            debug!(tab_id, "Navigation superseded before resolution");
            return None;
        }

        let fresh_headers = ticket.saw_headers();
        let mut origin_ip = if fresh_headers {
            self.store.get(tab_id)?.origin_ip
        } else {
            None
        };
        let mut upgrade_cdn = false;

        if origin_ip.is_none() {
            if let Some(ip) = self.resolve_target(tab_id, &target).await {
                upgrade_cdn = CdnClassifier::classify_addr(ip);
                origin_ip = Some(ip.to_string());
            }
        }

        let snapshot = self.blocklist.snapshot();
        let verdict = StatusEvaluator::evaluate(origin_ip.as_deref(), &snapshot);

        let state = self.store.commit(&ticket, |state| {
            if !fresh_headers {
                state.uses_cdn = false;
                state.provider_details = Default::default();
            }
            state.origin_ip = origin_ip;
            state.uses_cdn |= upgrade_cdn;
            state.block_status = verdict;
        });
        let Some(state) = state else {
            debug!(tab_id, "Discarding superseded reconciliation");
            return None;
        };

        info!(
            tab_id,
            uses_cdn = state.uses_cdn,
            fresh_headers,
            origin_ip = state.origin_ip.as_deref().unwrap_or("-"),
            verdict = %state.block_status,
            "Tab status resolved"
        );
        self.publish(&ticket, state).await
    }

    pub fn status(&self, tab_id: TabId) -> Option<TabStatus> {
        self.store
            .get(tab_id)
            .map(|state| TabStatus::new(tab_id, state))
    }

    pub fn tab_count(&self) -> usize {
        self.store.len()
    }

    async fn join_headers(&self, ticket: &mut NavigationTicket) {
        if ticket.has_headers() {
            return;
        }
        let arrived = tokio::time::timeout(self.grace_period, ticket.headers_arrived()).await;
        if arrived.is_err() {
            debug!(
                tab_id = ticket.tab_id,
                grace_ms = self.grace_period.as_millis() as u64,
                "No header signal within grace period"
            );
        }
    }

    async fn resolve_target(&self, tab_id: TabId, target: &WebTarget) -> Option<IpAddr> {
        match target {
            WebTarget::Address(ip) => Some(*ip),
            WebTarget::Domain(domain) => match self.resolver.resolve_a(domain).await {
                Ok(ip) => {
                    debug!(tab_id, domain = %domain, ip = %ip, resolver = self.resolver.name(), "Origin resolved");
                    Some(ip)
                }
                Err(e) => {
                    warn!(error = %e, tab_id, domain = %domain, "Origin resolution failed");
                    None
                }
            },
        }
    }

    async fn publish(&self, ticket: &NavigationTicket, state: TabState) -> Option<TabStatus> {
        let _order = self.sink_order.lock().await;
        if !self.store.is_current(ticket) {
            debug!(tab_id = ticket.tab_id, "Tab changed before publish");
            return None;
        }

        let status = TabStatus::new(ticket.tab_id, state);
        for sink in &self.sinks {
            if let Err(e) = sink.publish(&status).await {
                warn!(error = %e, tab_id = ticket.tab_id, "Failed to publish tab status");
            }
        }
        Some(status)
    }
}

fn parse_remote_ip(raw: &str) -> Result<String, DomainError> {
    raw.trim()
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| DomainError::MalformedInput(format!("remote ip {:?}", raw)))
}
