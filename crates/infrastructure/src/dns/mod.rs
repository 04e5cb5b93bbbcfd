pub mod doh_json;
pub mod fallback;

pub use doh_json::DohJsonResolver;
pub use fallback::FallbackResolver;
