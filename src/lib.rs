//! # dnsqueue
//!
//! A single-worker asynchronous DNS resolution queue.
//!
//! Callers enqueue hostnames from any thread; a dedicated worker thread
//! resolves them one at a time, each bounded by a configurable timeout,
//! and reports every outcome to a pluggable sink.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dnsqueue::resolution::{EngineConfig, ResolutionEngine};
//! use std::time::Duration;
//!
//! let engine = ResolutionEngine::new(EngineConfig::new().timeout(Duration::from_secs(2)))?;
//! engine.add_host("example.com")?;
//! engine.add_host_with_service("example.org", "https")?;
//! // ... results are logged through `tracing` as they complete
//! engine.stop();
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions and context helpers
//! - [`dns`] - Name resolution providers (system, hickory-dns, overrides)
//! - [`resolution`] - The queue, the engine and reporting sinks
//!
//! ## Guarantees
//!
//! - Requests are resolved in submission order, one at a time
//! - A lookup that outlives the timeout is cancelled and reported as timed out
//! - Requests removed before their turn are never reported
//! - `stop` joins the worker; nothing runs after it returns

pub mod base;
pub mod dns;
pub mod resolution;
