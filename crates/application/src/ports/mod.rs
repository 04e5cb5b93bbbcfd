mod address_resolver;
mod blocklist_cache;
mod blocklist_feed;
mod tab_status_sink;

pub use address_resolver::AddressResolver;
pub use blocklist_cache::BlocklistCachePort;
pub use blocklist_feed::BlocklistFeed;
pub use tab_status_sink::TabStatusSink;
