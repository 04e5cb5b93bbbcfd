use crate::tab_state::TabState;
use crate::verdict::BlockVerdict;
use serde::{Deserialize, Serialize};

/// Visual indicator selected for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Indicator {
    #[default]
    Off,
    CdnOn,
    ListedWarning,
    Blocked,
}

impl Indicator {
    /// A verdict outranks CDN usage; `Blocked` outranks `Listed`.
    pub fn for_state(state: &TabState) -> Self {
        match state.block_status {
            BlockVerdict::Blocked(_) => Indicator::Blocked,
            BlockVerdict::Listed(_) => Indicator::ListedWarning,
            BlockVerdict::Clean if state.uses_cdn => Indicator::CdnOn,
            BlockVerdict::Clean => Indicator::Off,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Off => "off",
            Indicator::CdnOn => "cdn-on",
            Indicator::ListedWarning => "listed-warning",
            Indicator::Blocked => "blocked",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "off" => Some(Indicator::Off),
            "cdn-on" => Some(Indicator::CdnOn),
            "listed-warning" => Some(Indicator::ListedWarning),
            "blocked" => Some(Indicator::Blocked),
            _ => None,
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
