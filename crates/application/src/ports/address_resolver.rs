use async_trait::async_trait;
use cdnsight_domain::DomainError;
use std::net::IpAddr;

/// One way of turning a host name into an IPv4 address.
///
/// Implementations are interchangeable; a fallback chain of them is itself an
/// `AddressResolver`.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve_a(&self, domain: &str) -> Result<IpAddr, DomainError>;

    fn name(&self) -> &str;
}
