//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors from the system resolver into `NetError` variants.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add DNS resolution context to an IO error.
    ///
    /// Errors that look like a definitive "no such host" answer become
    /// [`NetError::NameNotResolvedFor`]; anything else becomes
    /// [`NetError::NameResolutionFailedFor`].
    ///
    /// # Example
    /// ```ignore
    /// use dnsqueue::base::context::IoResultExt;
    ///
    /// let addrs = ("example.com", 80).to_socket_addrs().dns_context("example.com")?;
    /// ```
    fn dns_context(self, domain: &str) -> Result<T, NetError>;

    /// Add worker startup context to an IO error.
    fn worker_context(self) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| {
            if is_host_not_found(&e) {
                NetError::dns_failed(domain, e)
            } else {
                NetError::NameResolutionFailedFor {
                    domain: domain.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }

    fn worker_context(self) -> Result<T, NetError> {
        self.map_err(|e| NetError::WorkerStartFailed {
            reason: e.to_string(),
        })
    }
}

/// `getaddrinfo` failures surface as uncategorized IO errors, so the
/// platform message is the only signal for EAI_NONAME / EAI_NODATA.
fn is_host_not_found(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }
    let msg = err.to_string().to_ascii_lowercase();
    [
        "not known",
        "no address associated",
        "nodename nor servname",
        "no such host",
        "host not found",
    ]
    .iter()
    .any(|needle| msg.contains(needle))
}
