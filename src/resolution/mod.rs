//! Queued, single-flight host resolution.
//!
//! - [`ResolutionQueue`]: thread-safe FIFO of pending (host, service) requests
//! - [`ResolutionEngine`]: worker thread that drains the queue one lookup at
//!   a time, bounded by a per-lookup timeout
//! - [`ReportSink`]: where each [`ResolutionResult`] goes

mod config;
mod engine;
mod outcome;
mod queue;
mod runtime;
mod sink;

pub use config::{EngineConfig, ResolverBackend};
pub use engine::{EngineState, ResolutionEngine};
pub use outcome::{ResolutionOutcome, ResolutionResult};
pub use queue::{ResolutionQueue, ResolutionRequest};
pub use sink::{ChannelSink, ReportSink, TracingSink};
