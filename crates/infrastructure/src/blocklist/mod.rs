pub mod cache;
pub mod feed_client;

pub use cache::BlocklistCache;
pub use feed_client::HttpBlocklistFeed;
