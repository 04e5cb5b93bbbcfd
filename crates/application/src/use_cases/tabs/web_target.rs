use cdnsight_domain::DomainError;
use std::net::IpAddr;
use url::{Host, Url};

/// The resolvable part of a tab's URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebTarget {
    Domain(String),
    Address(IpAddr),
}

impl WebTarget {
    /// `Ok(None)` for URLs that are not web pages (`chrome://`, `file://`,
    /// `about:blank`, ...). Unparseable URLs are `MalformedInput`.
    pub fn parse(raw: &str) -> Result<Option<Self>, DomainError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| DomainError::MalformedInput(format!("url {:?}: {}", raw, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Ok(None);
        }

        Ok(match url.host() {
            Some(Host::Domain(domain)) if !domain.is_empty() => {
                Some(WebTarget::Domain(domain.trim_end_matches('.').to_ascii_lowercase()))
            }
            Some(Host::Ipv4(v4)) => Some(WebTarget::Address(IpAddr::V4(v4))),
            Some(Host::Ipv6(v6)) => Some(WebTarget::Address(IpAddr::V6(v6))),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_and_https_are_web_targets() {
        assert_eq!(
            WebTarget::parse("https://www.Example.com/path?q=1").unwrap(),
            Some(WebTarget::Domain("www.example.com".to_string()))
        );
        assert_eq!(
            WebTarget::parse("http://example.com.:8080/").unwrap(),
            Some(WebTarget::Domain("example.com".to_string()))
        );
    }

    #[test]
    fn test_ip_literal_hosts() {
        assert_eq!(
            WebTarget::parse("http://1.2.3.4/").unwrap(),
            Some(WebTarget::Address("1.2.3.4".parse().unwrap()))
        );
        assert_eq!(
            WebTarget::parse("https://[2606:4700::1]/").unwrap(),
            Some(WebTarget::Address("2606:4700::1".parse().unwrap()))
        );
    }

    #[test]
    fn test_non_web_schemes() {
        assert_eq!(WebTarget::parse("chrome://extensions").unwrap(), None);
        assert_eq!(WebTarget::parse("about:blank").unwrap(), None);
        assert_eq!(WebTarget::parse("file:///etc/hosts").unwrap(), None);
        assert_eq!(WebTarget::parse("ftp://example.com/").unwrap(), None);
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            WebTarget::parse("not a url"),
            Err(DomainError::MalformedInput(_))
        ));
    }
}
