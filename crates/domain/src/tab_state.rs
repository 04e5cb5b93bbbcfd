use crate::indicator::Indicator;
use crate::verdict::BlockVerdict;
use serde::{Deserialize, Serialize};

pub type TabId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabPhase {
    #[default]
    Uninitialized,
    /// Header signal received, verdict not yet computed.
    Partial,
    /// Navigation settled; IP and verdict are final for this page.
    Resolved,
}

/// Diagnostic fields, present only when the response headers supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    pub uses_cdn: bool,
    pub provider_details: ProviderDetails,
    pub block_status: BlockVerdict,
    pub origin_ip: Option<String>,
    pub phase: TabPhase,
}

impl TabState {
    pub fn indicator(&self) -> Indicator {
        Indicator::for_state(self)
    }
}

/// What consumers (popup, icon, storage) see for a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStatus {
    pub tab_id: TabId,
    pub state: TabState,
    pub indicator: Indicator,
}

impl TabStatus {
    pub fn new(tab_id: TabId, state: TabState) -> Self {
        let indicator = state.indicator();
        Self {
            tab_id,
            state,
            indicator,
        }
    }
}
