pub mod blocklist_sync;
pub mod runner;

pub use blocklist_sync::BlocklistSyncJob;
pub use runner::JobRunner;
