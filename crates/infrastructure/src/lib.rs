//! cdnsight infrastructure: HTTP feed, blocklist cache, DoH resolvers, SQLite storage
pub mod blocklist;
pub mod database;
pub mod dns;
pub mod repositories;
