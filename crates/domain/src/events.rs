use crate::tab_state::TabId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Response metadata for a tab's main document request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersReceived {
    pub tab_id: TabId,
    #[serde(default)]
    pub response_headers: Vec<HeaderEntry>,
    #[serde(default)]
    pub remote_ip: Option<String>,
}

/// Page-load lifecycle signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLoad {
    pub tab_id: TabId,
    pub url: String,
    #[serde(default)]
    pub navigation_complete: bool,
}
