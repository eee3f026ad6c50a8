//! Reporting sinks that receive resolution results.

use super::outcome::{ResolutionOutcome, ResolutionResult};
use tokio::sync::mpsc;

/// Receives one [`ResolutionResult`] per request that started resolving.
///
/// Called on the engine's worker thread; implementations must return
/// quickly since the next lookup waits for them.
pub trait ReportSink: Send + Sync {
    fn report(&self, result: ResolutionResult);
}

impl<F> ReportSink for F
where
    F: Fn(ResolutionResult) + Send + Sync,
{
    fn report(&self, result: ResolutionResult) {
        self(result)
    }
}

/// Default sink: logs every outcome through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, result: ResolutionResult) {
        let host = result.host.as_str();
        let elapsed_ms = result.elapsed.as_millis() as u64;
        match &result.outcome {
            ResolutionOutcome::Resolved(ips) => {
                tracing::info!(host = %host, count = ips.len(), elapsed_ms, "{}", result.outcome);
            }
            ResolutionOutcome::Cancelled => {
                tracing::debug!(host = %host, elapsed_ms, "resolution cancelled");
            }
            outcome => {
                tracing::warn!(host = %host, elapsed_ms, "resolution failed: {}", outcome);
            }
        }
    }
}

/// Forwards results into an unbounded tokio channel.
///
/// Results are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ResolutionResult>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ResolutionResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ReportSink for ChannelSink {
    fn report(&self, result: ResolutionResult) {
        if self.tx.send(result).is_err() {
            tracing::trace!("result receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::Service;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    fn result(host: &str) -> ResolutionResult {
        ResolutionResult {
            host: host.to_string(),
            service: Service::default(),
            outcome: ResolutionOutcome::TimedOut,
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |r: ResolutionResult| seen.lock().push(r.host)
        };
        sink.report(result("a"));
        sink.report(result("b"));
        assert_eq!(*seen.lock(), vec!["a", "b"]);
    }

    #[test]
    fn test_channel_sink() {
        let (sink, mut rx) = ChannelSink::new();
        sink.report(result("a"));
        assert_eq!(rx.try_recv().unwrap().host, "a");

        drop(rx);
        // Must not panic once the receiver is gone
        sink.report(result("b"));
    }

    #[test]
    fn test_tracing_sink_accepts_every_outcome() {
        let sink = TracingSink;
        for outcome in [
            ResolutionOutcome::Resolved(vec!["127.0.0.1".parse().unwrap()]),
            ResolutionOutcome::NotFound,
            ResolutionOutcome::Cancelled,
            ResolutionOutcome::OtherError("boom".into()),
        ] {
            sink.report(ResolutionResult {
                outcome,
                ..result("x")
            });
        }
    }
}
