mod repositories;
mod services;

pub use repositories::Repositories;
pub use services::Services;

use crate::server::{NativeHostSink, OutboundMessage};
use cdnsight_application::use_cases::TabCoordinator;
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn build_coordinator(
    services: &Services,
    repos: &Repositories,
    outbound: mpsc::Sender<OutboundMessage>,
) -> Arc<TabCoordinator> {
    let mut coordinator =
        TabCoordinator::new(services.resolver.clone(), services.blocklist.clone())
            .with_sink(Arc::new(NativeHostSink::new(outbound)));

    if let Some(tab_status) = &repos.tab_status {
        coordinator = coordinator.with_sink(tab_status.clone());
    }

    Arc::new(coordinator)
}
