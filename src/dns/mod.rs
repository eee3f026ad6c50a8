//! DNS Resolution Module
//!
//! Provides the pluggable name resolution providers used by the engine:
//! - System resolver (getaddrinfo via thread pool)
//! - Async hickory-dns resolver (DoH/DoT capable)
//! - Hostname-to-IP override mechanism
//!
//! # Architecture
//!
//! The `Resolve` trait is the core abstraction. The engine holds a single
//! `Arc<dyn Resolve>` and reuses it for every request; tests substitute
//! their own implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use dnsqueue::dns::{GaiResolver, Name, Resolve};
//!
//! let resolver = GaiResolver::new();
//! for addr in resolver.resolve(Name::new("example.com"), 80).await? {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod gai;
mod hickory;
mod resolve;
mod service;

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{Addrs, DnsResolverWithOverrides, Name, Resolve, Resolving};
pub use service::Service;
