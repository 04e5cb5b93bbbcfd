//! cdnsight domain layer
pub mod blocklist_snapshot;
pub mod cdn;
pub mod config;
pub mod errors;
pub mod events;
pub mod feed;
pub mod indicator;
pub mod provider_record;
pub mod tab_state;
pub mod verdict;

pub use blocklist_snapshot::{normalize_ip, BlocklistSnapshot, SnapshotStats};
pub use cdn::{CdnClassifier, HeaderSignals};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use events::{HeaderEntry, HeadersReceived, PageLoad};
pub use feed::{FeedDocument, FeedEntry};
pub use indicator::Indicator;
pub use provider_record::{ProviderRecord, StateChange};
pub use tab_state::{ProviderDetails, TabId, TabPhase, TabState, TabStatus};
pub use verdict::{BlockVerdict, BlockedDetail, ListedDetail, ProviderStatus};
