pub mod coordinator;
pub mod store;
pub mod web_target;

pub use coordinator::{PendingNavigation, TabCoordinator};
pub use store::{NavigationTicket, TabStateStore};
pub use web_target::WebTarget;
