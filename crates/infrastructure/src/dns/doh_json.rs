use async_trait::async_trait;
use cdnsight_application::ports::AddressResolver;
use cdnsight_domain::DomainError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tracing::debug;

const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";
const RECORD_TYPE_A: u16 = 1;

#[derive(Debug, Deserialize)]
struct DohJsonResponse {
    #[serde(rename = "Status", default)]
    status: u16,
    #[serde(rename = "Answer", default)]
    answer: Vec<DohJsonAnswer>,
}

#[derive(Debug, Deserialize)]
struct DohJsonAnswer {
    #[serde(rename = "type")]
    record_type: u16,
    data: String,
}

/// Resolver speaking the JSON flavour of DNS-over-HTTPS
/// (`GET <endpoint>?name=<domain>&type=A`).
pub struct DohJsonResolver {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl DohJsonResolver {
    pub fn new(endpoint: impl Into<String>, client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
            timeout,
        }
    }
}

#[async_trait]
impl AddressResolver for DohJsonResolver {
    async fn resolve_a(&self, domain: &str) -> Result<IpAddr, DomainError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("name", domain), ("type", "A")])
            .header(reqwest::header::ACCEPT, DNS_JSON_CONTENT_TYPE)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::resolution_failed(domain, format!("{}: {}", self.endpoint, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::resolution_failed(
                domain,
                format!("{}: HTTP {}", self.endpoint, response.status().as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::resolution_failed(domain, format!("{}: {}", self.endpoint, e)))?;

        let ip = parse_a_answer(domain, &body)?;
        debug!(endpoint = %self.endpoint, domain = %domain, ip = %ip, "DoH answer");
        Ok(ip)
    }

    fn name(&self) -> &str {
        &self.endpoint
    }
}

/// First A record of a DNS JSON answer. CNAME hops and other record types
/// in the answer section are skipped.
pub fn parse_a_answer(domain: &str, body: &str) -> Result<IpAddr, DomainError> {
    let response: DohJsonResponse = serde_json::from_str(body)
        .map_err(|e| DomainError::resolution_failed(domain, format!("invalid DNS JSON: {}", e)))?;

    if response.status != 0 {
        return Err(DomainError::resolution_failed(
            domain,
            format!("DNS status {}", response.status),
        ));
    }

    response
        .answer
        .iter()
        .filter(|answer| answer.record_type == RECORD_TYPE_A)
        .find_map(|answer| answer.data.trim().parse::<Ipv4Addr>().ok())
        .map(IpAddr::V4)
        .ok_or_else(|| DomainError::resolution_failed(domain, "no A record in answer"))
}
