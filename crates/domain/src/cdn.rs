//! Cloudflare detection from response headers and from address ranges.

use crate::events::HeaderEntry;
use crate::tab_state::ProviderDetails;
use ipnetwork::IpNetwork;
use std::net::IpAddr;
use std::sync::LazyLock;

pub const PROVIDER_NAME: &str = "cloudflare";
pub const RAY_HEADER: &str = "cf-ray";
pub const CACHE_STATUS_HEADER: &str = "cf-cache-status";
pub const SERVER_HEADER: &str = "server";

/// Published Cloudflare edge ranges (https://www.cloudflare.com/ips/).
const PROVIDER_RANGES: &[&str] = &[
    "173.245.48.0/20",
    "103.21.244.0/22",
    "103.22.200.0/22",
    "103.31.4.0/22",
    "141.101.64.0/18",
    "108.162.192.0/18",
    "190.93.240.0/20",
    "188.114.96.0/20",
    "197.234.240.0/22",
    "198.41.128.0/17",
    "162.158.0.0/15",
    "104.16.0.0/13",
    "104.24.0.0/14",
    "172.64.0.0/13",
    "131.0.72.0/22",
    "2400:cb00::/32",
    "2606:4700::/32",
    "2803:f800::/32",
    "2405:b500::/32",
    "2405:8100::/32",
    "2a06:98c0::/29",
    "2c0f:f248::/32",
];

static NETWORKS: LazyLock<Vec<IpNetwork>> = LazyLock::new(|| {
    PROVIDER_RANGES
        .iter()
        .filter_map(|cidr| cidr.parse().ok())
        .collect()
});

/// What the response headers of a main document said about the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSignals {
    pub uses_cdn: bool,
    pub details: ProviderDetails,
}

pub struct CdnClassifier;

impl CdnClassifier {
    pub fn classify_headers(headers: &[HeaderEntry]) -> HeaderSignals {
        let mut signals = HeaderSignals::default();

        for header in headers {
            let name = header.name.trim();
            if name.eq_ignore_ascii_case(SERVER_HEADER) {
                if header.value.to_ascii_lowercase().contains(PROVIDER_NAME) {
                    signals.uses_cdn = true;
                }
            } else if name.eq_ignore_ascii_case(RAY_HEADER) {
                signals.uses_cdn = true;
                signals.details.connection_id = Some(header.value.trim().to_string());
            } else if name.eq_ignore_ascii_case(CACHE_STATUS_HEADER) {
                signals.details.cache_status = Some(header.value.trim().to_string());
            }
        }

        signals
    }

    /// False for anything that is not a valid address.
    pub fn classify_ip(ip: &str) -> bool {
        match ip.trim().parse::<IpAddr>() {
            Ok(addr) => Self::classify_addr(addr),
            Err(_) => false,
        }
    }

    pub fn classify_addr(addr: IpAddr) -> bool {
        let addr = match addr {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(addr),
            v4 => v4,
        };
        NETWORKS.iter().any(|network| network.contains(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, value: &str) -> HeaderEntry {
        HeaderEntry::new(name, value)
    }

    #[test]
    fn test_all_ranges_parse() {
        assert_eq!(NETWORKS.len(), PROVIDER_RANGES.len());
    }

    #[test]
    fn test_classify_ip_known_edges() {
        assert!(CdnClassifier::classify_ip("104.20.1.1"));
        assert!(CdnClassifier::classify_ip("172.67.0.5"));
        assert!(CdnClassifier::classify_ip("2606:4700::6810:84e5"));
        assert!(CdnClassifier::classify_ip("::ffff:104.16.0.1"));
    }

    #[test]
    fn test_classify_ip_rejects_others() {
        assert!(!CdnClassifier::classify_ip("8.8.8.8"));
        assert!(!CdnClassifier::classify_ip("104.32.0.1"));
        assert!(!CdnClassifier::classify_ip("not-an-ip"));
        assert!(!CdnClassifier::classify_ip(""));
        assert!(!CdnClassifier::classify_ip("999.1.1.1"));
    }

    #[test]
    fn test_range_boundaries() {
        assert!(CdnClassifier::classify_ip("104.23.255.255"));
        assert!(!CdnClassifier::classify_ip("104.15.255.255"));
        assert!(CdnClassifier::classify_ip("173.245.63.255"));
        assert!(!CdnClassifier::classify_ip("173.245.64.0"));
    }

    #[test]
    fn test_server_header_is_case_insensitive() {
        let signals = CdnClassifier::classify_headers(&[header("Server", "CloudFlare")]);
        assert!(signals.uses_cdn);
        assert_eq!(signals.details, ProviderDetails::default());
    }

    #[test]
    fn test_ray_and_cache_status_are_captured() {
        let signals = CdnClassifier::classify_headers(&[
            header("CF-RAY", "8a1b2c3d4e5f-MAD"),
            header("cf-cache-status", "HIT"),
            header("content-type", "text/html"),
        ]);

        assert!(signals.uses_cdn);
        assert_eq!(signals.details.connection_id.as_deref(), Some("8a1b2c3d4e5f-MAD"));
        assert_eq!(signals.details.cache_status.as_deref(), Some("HIT"));
    }

    #[test]
    fn test_cache_status_alone_does_not_flag() {
        let signals = CdnClassifier::classify_headers(&[
            header("server", "nginx"),
            header("cf-cache-status", "DYNAMIC"),
        ]);

        assert!(!signals.uses_cdn);
        assert_eq!(signals.details.cache_status.as_deref(), Some("DYNAMIC"));
    }
}
