//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`, executed on the runtime's blocking pool so the engine's
//! event loop keeps serving timers while a lookup is outstanding.
//!
//! # Cancellation
//!
//! `getaddrinfo` itself cannot be interrupted. Dropping the returned future
//! detaches the blocking call; its answer is discarded when it arrives.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

/// System DNS resolver using `getaddrinfo` in a thread pool.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name, port: u16) -> Resolving {
        Box::pin(async move {
            if let Some(addr) = literal_addr(name.as_str(), port) {
                return Ok(Box::new(std::iter::once(addr)) as Addrs);
            }

            let host = name.as_str().to_string();
            let domain = host.clone();

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, port, "resolving via getaddrinfo");
                (host.as_str(), port).to_socket_addrs().map(|iter| iter.collect::<Vec<_>>())
            })
            .await;

            // Handle task join error (cancellation, panic)
            let addrs = result
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    if e.is_cancelled() {
                        NetError::Aborted
                    } else {
                        NetError::NameResolutionFailed
                    }
                })?
                .dns_context(&domain)
                .inspect_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                })?;

            if addrs.is_empty() {
                return Err(NetError::NameNotResolvedFor {
                    domain,
                    reason: "No addresses returned by getaddrinfo".to_string(),
                });
            }

            tracing::debug!(domain = %domain, count = addrs.len(), "DNS resolution complete");
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

/// Parses `host` as a literal IP address, bypassing DNS.
///
/// Accepts bracketed IPv6 literals (`[::1]`) as well as bare ones.
pub(crate) fn literal_addr(host: &str, port: u16) -> Option<SocketAddr> {
    let trimmed = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
    trimmed.parse::<IpAddr>().ok().map(|ip| SocketAddr::new(ip, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_literal_ipv4() {
        let addr = literal_addr("127.0.0.1", 8080).unwrap();
        assert_eq!(addr, SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080));
    }

    #[test]
    fn test_literal_ipv6() {
        let addr = literal_addr("::1", 443).unwrap();
        assert_eq!(addr.ip(), IpAddr::V6(Ipv6Addr::LOCALHOST));

        let bracketed = literal_addr("[::1]", 443).unwrap();
        assert_eq!(bracketed, addr);
    }

    #[test]
    fn test_literal_hostname() {
        assert!(literal_addr("example.com", 80).is_none());
    }

    #[tokio::test]
    async fn test_gai_resolver_literal_skips_lookup() {
        let resolver = GaiResolver::new();
        let addrs: Vec<_> = resolver.resolve(Name::new("10.0.0.1"), 22).await.unwrap().collect();
        assert_eq!(addrs, vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 22)]);
    }

    #[tokio::test]
    async fn test_gai_resolver_localhost() {
        let resolver = GaiResolver::new();
        let result = resolver.resolve(Name::new("localhost"), 80).await;

        // localhost should always resolve
        assert!(result.is_ok());
        let addrs: Vec<_> = result.unwrap().collect();
        assert!(!addrs.is_empty());
        assert!(addrs.iter().all(|a| a.port() == 80));
    }
}
