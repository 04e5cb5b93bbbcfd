//! Per-tab state table.
//!
//! Each tab owns a `TabState` plus two counters:
//!   - `generation` bumps on tab reset and on every navigation-complete; a
//!     reconciliation only commits while its generation is still current, so
//!     a later navigation always wins over an earlier one still in flight.
//!   - the header sequence (a `watch` channel) bumps on every header event;
//!     navigation-complete joins on it to see headers for its own page.
//!
//! Guards on the map are never held across an await point.

use cdnsight_domain::{HeaderSignals, TabId, TabPhase, TabState};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use tokio::sync::watch;

struct TabEntry {
    state: TabState,
    generation: u64,
    headers: watch::Sender<u64>,
    headers_consumed: u64,
}

impl TabEntry {
    fn new() -> Self {
        let (headers, _) = watch::channel(0);
        Self {
            state: TabState::default(),
            generation: 0,
            headers,
            headers_consumed: 0,
        }
    }

    fn header_seq(&self) -> u64 {
        *self.headers.borrow()
    }
}

/// Handle a reconciliation holds between its start and its commit.
#[derive(Debug, Clone)]
pub struct NavigationTicket {
    pub tab_id: TabId,
    pub generation: u64,
    headers: watch::Receiver<u64>,
    headers_consumed: u64,
    headers_seen: u64,
}

impl NavigationTicket {
    /// Whether a header event landed since the previous navigation settled.
    pub fn has_headers(&self) -> bool {
        *self.headers.borrow() > self.headers_consumed
    }

    /// Resolves once a header event for this navigation has been applied.
    /// Returns false if the tab went away first.
    pub async fn headers_arrived(&mut self) -> bool {
        let consumed = self.headers_consumed;
        match self.headers.wait_for(|seq| *seq > consumed).await {
            Ok(seq) => {
                self.headers_seen = *seq;
                true
            }
            Err(_) => false,
        }
    }

    /// Whether this navigation observed a header event of its own. Without
    /// one, the header-derived fields in the table belong to an earlier page.
    pub fn saw_headers(&self) -> bool {
        self.headers_seen > self.headers_consumed
    }

    fn mark_seen(&mut self) {
        self.headers_seen = *self.headers.borrow();
    }
}

pub struct TabStateStore {
    tabs: DashMap<TabId, TabEntry, FxBuildHasher>,
}

impl TabStateStore {
    pub fn new() -> Self {
        Self {
            tabs: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Tab created: back to defaults and any in-flight reconciliation is
    /// superseded.
    pub fn reset(&self, tab_id: TabId) {
        let mut entry = self.tabs.entry(tab_id).or_insert_with(TabEntry::new);
        entry.state = TabState::default();
        entry.generation += 1;
        entry.headers_consumed = entry.header_seq();
    }

    /// Replaces the header-derived fields and wakes any navigation waiting on
    /// the header join. The verdict is left for the navigation to settle.
    pub fn apply_headers(&self, tab_id: TabId, signals: HeaderSignals, origin_ip: Option<String>) {
        let mut entry = self.tabs.entry(tab_id).or_insert_with(TabEntry::new);
        entry.state.uses_cdn = signals.uses_cdn;
        entry.state.provider_details = signals.details;
        entry.state.origin_ip = origin_ip;
        entry.state.phase = TabPhase::Partial;
        entry.headers.send_modify(|seq| *seq += 1);
    }

    pub fn begin_navigation(&self, tab_id: TabId) -> NavigationTicket {
        let mut entry = self.tabs.entry(tab_id).or_insert_with(TabEntry::new);
        entry.generation += 1;
        let mut ticket = NavigationTicket {
            tab_id,
            generation: entry.generation,
            headers: entry.headers.subscribe(),
            headers_consumed: entry.headers_consumed,
            headers_seen: entry.headers_consumed,
        };
        if ticket.has_headers() {
            ticket.mark_seen();
        }
        ticket
    }

    /// Applies `update` if the ticket is still the tab's current navigation.
    /// Returns the committed state, or `None` when the tab was closed or a
    /// newer navigation superseded this one.
    pub fn commit<F>(&self, ticket: &NavigationTicket, update: F) -> Option<TabState>
    where
        F: FnOnce(&mut TabState),
    {
        let mut entry = self.tabs.get_mut(&ticket.tab_id)?;
        if entry.generation != ticket.generation {
            return None;
        }
        update(&mut entry.state);
        entry.state.phase = TabPhase::Resolved;
        entry.headers_consumed = entry.headers_consumed.max(ticket.headers_seen);
        Some(entry.state.clone())
    }

    pub fn get(&self, tab_id: TabId) -> Option<TabState> {
        self.tabs.get(&tab_id).map(|entry| entry.state.clone())
    }

    pub fn is_current(&self, ticket: &NavigationTicket) -> bool {
        self.tabs
            .get(&ticket.tab_id)
            .is_some_and(|entry| entry.generation == ticket.generation)
    }

    /// Tab closed. Dropping the entry also closes its header channel, which
    /// releases any navigation still waiting on it.
    pub fn remove(&self, tab_id: TabId) -> bool {
        self.tabs.remove(&tab_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        let mut ids: Vec<TabId> = self.tabs.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for TabStateStore {
    fn default() -> Self {
        Self::new()
    }
}
