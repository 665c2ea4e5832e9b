// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Link classification
//!
//! The page's identity is an explicit [`PageHost`] value rather than an
//! ambient lookup, so classification is a pure function and testable
//! without any document at all.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::policy::HostMatch;
use crate::error::{Error, Result};

/// The host identity of the hosting page
///
/// `port` is the *explicit non-default* port, mirroring `Location.host`:
/// `Url::port()` already returns `None` when the port is the scheme
/// default, so `https://example.com:443/` and `https://example.com/`
/// produce the same `PageHost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHost {
    /// Lowercase hostname
    pub hostname: String,
    /// Explicit non-default port, if any
    pub port: Option<u16>,
}

impl PageHost {
    /// Extract the host identity from a URL, `None` for hostless URLs
    /// (`mailto:`, `javascript:`, `data:`, ...)
    pub fn from_url(url: &Url) -> Option<Self> {
        url.host_str().map(|h| Self {
            hostname: h.to_ascii_lowercase(),
            port: url.port(),
        })
    }

    /// Parse a `host` or `host:port` string
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::config("empty host"));
        }

        // Bracketed IPv6 carries colons of its own
        let (hostname, port_part) = if let Some(rest) = s.strip_prefix('[') {
            let end = rest
                .find(']')
                .ok_or_else(|| Error::config(format!("unclosed IPv6 literal: {}", s)))?;
            let host = &s[..end + 2];
            let rest = &s[end + 2..];
            (host, rest.strip_prefix(':'))
        } else {
            match s.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (s, None),
            }
        };

        if hostname.is_empty() {
            return Err(Error::config(format!("missing hostname in: {}", s)));
        }

        let port = match port_part {
            Some(p) => Some(
                p.parse::<u16>()
                    .map_err(|_| Error::config(format!("invalid port in: {}", s)))?,
            ),
            None => None,
        };

        Ok(Self {
            hostname: hostname.to_ascii_lowercase(),
            port,
        })
    }

    /// Compare two host identities under a matching rule
    pub fn matches(&self, other: &PageHost, rule: HostMatch) -> bool {
        if self.hostname != other.hostname {
            return false;
        }
        match rule {
            HostMatch::HostAndPort => self.port == other.port,
            HostMatch::HostnameOnly => true,
        }
    }
}

impl fmt::Display for PageHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.hostname, port),
            None => write!(f, "{}", self.hostname),
        }
    }
}

/// What the annotator should do with one anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    /// Destination host equals the page host: leave untouched
    Internal,
    /// Destination host differs: annotate
    External,
    /// No destination, unresolvable destination, or no host component:
    /// skip without side effect
    Inert,
}

/// Classify one href against the page host
///
/// Relative hrefs resolve against `base`; with no base they cannot name a
/// host and are inert. Resolution failures are inert, never errors.
pub fn classify_href(
    href: Option<&str>,
    base: Option<&Url>,
    page_host: &PageHost,
    rule: HostMatch,
) -> LinkClass {
    let Some(href) = href else {
        return LinkClass::Inert;
    };

    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    let Ok(resolved) = resolved else {
        return LinkClass::Inert;
    };

    let Some(link_host) = PageHost::from_url(&resolved) else {
        return LinkClass::Inert;
    };

    if link_host.matches(page_host, rule) {
        LinkClass::Internal
    } else {
        LinkClass::External
    }
}

/// Resolve an href to an absolute URL, if it names one
pub(crate) fn resolve_href(href: &str, base: Option<&Url>) -> Option<Url> {
    match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    }
}

/// A lightweight anchor record, decoupled from any rendering environment
///
/// Lets the annotation algorithm run over plain data in tests and in
/// callers that already have their own link representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    /// Destination, as written in the markup (may be relative)
    pub href: Option<String>,
    attributes: Vec<(String, String)>,
}

impl LinkDescriptor {
    /// A link with a destination
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            attributes: Vec::new(),
        }
    }

    /// A link with no destination at all
    pub fn inert() -> Self {
        Self {
            href: None,
            attributes: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Check if an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageHost {
        PageHost::parse("example.com").unwrap()
    }

    fn base() -> Url {
        Url::parse("https://example.com/guide/").unwrap()
    }

    #[test]
    fn test_same_host_is_internal() {
        let class = classify_href(
            Some("https://example.com/about"),
            Some(&base()),
            &page(),
            HostMatch::HostAndPort,
        );
        assert_eq!(class, LinkClass::Internal);
    }

    #[test]
    fn test_other_host_is_external() {
        let class = classify_href(
            Some("https://other.org/page"),
            Some(&base()),
            &page(),
            HostMatch::HostAndPort,
        );
        assert_eq!(class, LinkClass::External);
    }

    #[test]
    fn test_relative_resolves_to_page_host() {
        let class = classify_href(
            Some("/relative/path"),
            Some(&base()),
            &page(),
            HostMatch::HostAndPort,
        );
        assert_eq!(class, LinkClass::Internal);
    }

    #[test]
    fn test_scheme_is_not_compared() {
        let class = classify_href(
            Some("http://example.com/insecure"),
            Some(&base()),
            &page(),
            HostMatch::HostAndPort,
        );
        assert_eq!(class, LinkClass::Internal);
    }

    #[test]
    fn test_explicit_port_differs() {
        let class = classify_href(
            Some("https://example.com:8080/x"),
            Some(&base()),
            &page(),
            HostMatch::HostAndPort,
        );
        assert_eq!(class, LinkClass::External);

        let class = classify_href(
            Some("https://example.com:8080/x"),
            Some(&base()),
            &page(),
            HostMatch::HostnameOnly,
        );
        assert_eq!(class, LinkClass::Internal);
    }

    #[test]
    fn test_default_port_is_normalized_away() {
        let class = classify_href(
            Some("https://example.com:443/x"),
            Some(&base()),
            &page(),
            HostMatch::HostAndPort,
        );
        assert_eq!(class, LinkClass::Internal);
    }

    #[test]
    fn test_missing_and_hostless_are_inert() {
        let rule = HostMatch::HostAndPort;
        assert_eq!(classify_href(None, Some(&base()), &page(), rule), LinkClass::Inert);
        assert_eq!(
            classify_href(Some("mailto:dev@other.org"), Some(&base()), &page(), rule),
            LinkClass::Inert
        );
        assert_eq!(
            classify_href(Some("javascript:void(0)"), Some(&base()), &page(), rule),
            LinkClass::Inert
        );
    }

    #[test]
    fn test_relative_without_base_is_inert() {
        assert_eq!(
            classify_href(Some("/docs"), None, &page(), HostMatch::HostAndPort),
            LinkClass::Inert
        );
    }

    #[test]
    fn test_page_host_parse() {
        assert_eq!(
            PageHost::parse("Example.COM:8080").unwrap(),
            PageHost {
                hostname: "example.com".into(),
                port: Some(8080)
            }
        );
        assert_eq!(PageHost::parse("example.com").unwrap().port, None);
        assert!(PageHost::parse("").is_err());
        assert!(PageHost::parse("example.com:notaport").is_err());
    }

    #[test]
    fn test_page_host_from_page_url() {
        let url = Url::parse("https://docs.example.com:8443/guide/").unwrap();
        let host = PageHost::from_url(&url).unwrap();
        assert_eq!(host.to_string(), "docs.example.com:8443");

        let url = Url::parse("https://docs.example.com/guide/").unwrap();
        assert_eq!(PageHost::from_url(&url).unwrap().to_string(), "docs.example.com");
    }
}
