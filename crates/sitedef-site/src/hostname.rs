//! Hostname to welcome page bindings.

use crate::node::PageId;

/// Immutable binding of a host address to a welcome page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hostname {
    address: String,
    welcome_page: PageId,
}

impl Hostname {
    pub(crate) fn new(address: String, welcome_page: PageId) -> Self {
        Self {
            address,
            welcome_page,
        }
    }

    /// Address as registered.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Page served for this address.
    #[must_use]
    pub fn welcome_page(&self) -> PageId {
        self.welcome_page
    }

    /// True if `host` names this address.
    pub(crate) fn matches(&self, host: &str) -> bool {
        normalize_host(&self.address) == normalize_host(host)
    }
}

/// Canonical form for host comparison: trimmed, lowercase, no port, no
/// trailing dot.
pub(crate) fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    };
    host.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host_lowercases_and_strips_port() {
        assert_eq!(normalize_host("Example.COM:8080"), "example.com");
    }

    #[test]
    fn test_normalize_host_strips_trailing_dot() {
        assert_eq!(normalize_host("example.com."), "example.com");
    }

    #[test]
    fn test_normalize_host_keeps_ipv6_literal() {
        assert_eq!(normalize_host("::1"), "::1");
    }

    #[test]
    fn test_matches_ignores_case_and_port() {
        let hostname = Hostname::new("www.example.com".to_owned(), PageId::new(0));
        assert!(hostname.matches("WWW.example.com:443"));
        assert!(!hostname.matches("example.com"));
    }
}
