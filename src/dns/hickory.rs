//! Async DNS resolver using hickory-dns.
//!
//! This resolver provides fully async DNS resolution with support for:
//! - DNS-over-HTTPS (DoH)
//! - DNS-over-TLS (DoT)
//! - System DNS configuration auto-detection
//! - IPv4 + IPv6 lookups
//!
//! Unlike `GaiResolver`, dropping an outstanding lookup really cancels it:
//! the query future is torn down with no blocking thread left behind.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use crate::dns::gai::literal_addr;
use hickory_resolver::{
    config::{LookupIpStrategy, ResolverConfig},
    name_server::TokioConnectionProvider,
    ResolveError, TokioResolver,
};
use std::{net::SocketAddr, sync::Arc};

/// Async DNS resolver backed by hickory-dns.
///
/// Each instance owns its resolver, so the connection pools it keeps
/// live on whichever runtime first polls a lookup (the engine's worker).
///
/// # Example
///
/// ```rust,ignore
/// use dnsqueue::dns::{HickoryResolver, Name, Resolve};
///
/// let resolver = HickoryResolver::new();
/// let addrs = resolver.resolve(Name::new("example.com"), 443).await?;
/// ```
#[derive(Clone)]
pub struct HickoryResolver {
    resolver: Arc<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver` from the system configuration.
    ///
    /// If the system configuration cannot be read it falls back to
    /// hickory's defaults.
    pub fn new() -> Self {
        let mut builder = match TokioResolver::builder_tokio() {
            Ok(builder) => {
                tracing::debug!("Using system DNS configuration");
                builder
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read system DNS config, using defaults");
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
            }
        };
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        Self {
            resolver: Arc::new(builder.build()),
        }
    }

    /// Creates a resolver that queries the given upstream configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        let mut builder =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        Self {
            resolver: Arc::new(builder.build()),
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryResolver").finish_non_exhaustive()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name, port: u16) -> Resolving {
        let resolver = Arc::clone(&self.resolver);
        Box::pin(async move {
            if let Some(addr) = literal_addr(name.as_str(), port) {
                return Ok(Box::new(std::iter::once(addr)) as Addrs);
            }

            let domain = name.as_str();
            tracing::debug!(domain = %domain, "resolving via hickory-dns");

            let lookup = resolver.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                classify(domain, &e)
            })?;

            let addrs: Vec<SocketAddr> =
                lookup.iter().map(|ip| SocketAddr::new(ip, port)).collect();

            if addrs.is_empty() {
                return Err(NetError::NameNotResolvedFor {
                    domain: domain.to_string(),
                    reason: "No addresses returned".to_string(),
                });
            }

            tracing::debug!(
                domain = %domain,
                count = addrs.len(),
                "hickory-dns resolution complete"
            );
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

fn classify(domain: &str, err: &ResolveError) -> NetError {
    let domain = domain.to_string();
    let reason = err.to_string();
    if err.is_nx_domain() || err.is_no_records_found() {
        NetError::NameNotResolvedFor { domain, reason }
    } else {
        NetError::NameResolutionFailedFor { domain, reason }
    }
}
