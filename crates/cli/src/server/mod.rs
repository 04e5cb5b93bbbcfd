pub mod codec;
pub mod messages;
pub mod native_host;

pub use messages::OutboundMessage;
pub use native_host::{NativeHost, NativeHostSink};

/// Outbound messages buffered before publishers wait on the stdout writer.
pub const OUTBOUND_QUEUE_DEPTH: usize = 256;
