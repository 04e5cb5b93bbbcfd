pub mod tabs;

pub use tabs::{PendingNavigation, TabCoordinator, TabStateStore, WebTarget};
