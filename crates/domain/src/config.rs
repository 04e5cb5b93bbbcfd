pub mod errors;
pub mod feed;
pub mod logging;
pub mod resolver;
pub mod root;
pub mod storage;

use std::time::Duration;

pub use errors::ConfigError;
pub use feed::FeedConfig;
pub use logging::LoggingConfig;
pub use resolver::{ResolverConfig, MAX_RESOLVER_ENDPOINTS};
pub use root::{CliOverrides, Config};
pub use storage::StorageConfig;

/// Blocklist feed refresh period.
pub const BLOCKLIST_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Upper bound on how long navigation-complete waits for the header signal.
pub const HEADER_GRACE_PERIOD: Duration = Duration::from_millis(50);
