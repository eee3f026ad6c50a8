//! Single-worker resolution engine.
//!
//! Callers enqueue hosts from any thread; one worker thread drains the
//! queue strictly one lookup at a time. Each lookup races the engine's
//! timeout timer, and the loser of the race is dropped (cancelled) before
//! the outcome is reported and the next request is popped.

use super::config::{EngineConfig, ResolverBackend};
use super::outcome::{ResolutionOutcome, ResolutionResult};
use super::queue::{ResolutionQueue, ResolutionRequest};
use super::runtime::{ExecutionContext, Shutdown};
use super::sink::{ReportSink, TracingSink};
use crate::base::neterror::NetError;
use crate::dns::{GaiResolver, HickoryResolver, Name, Resolve, Service};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{Instant, Sleep};

/// Lifecycle of a [`ResolutionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Stopping,
    Stopped,
}

/// State shared between callers and the worker.
struct Shared {
    queue: ResolutionQueue,
    /// "There may be new work." Holds at most one permit, so redundant
    /// signals collapse into a single extra (empty) drain pass.
    wake: Notify,
    state: Mutex<EngineState>,
}

/// Resolves queued hosts on a dedicated worker thread.
///
/// # Example
///
/// ```rust,ignore
/// use dnsqueue::resolution::{EngineConfig, ResolutionEngine};
///
/// let engine = ResolutionEngine::new(EngineConfig::default())?;
/// engine.add_host("example.com")?;
/// engine.add_host_with_service("example.org", "https")?;
/// println!("pending: {:?}", engine.list_pending());
/// engine.stop();
/// ```
pub struct ResolutionEngine {
    shared: Arc<Shared>,
    context: Mutex<Option<ExecutionContext>>,
    worker_id: ThreadId,
    config: EngineConfig,
}

impl ResolutionEngine {
    /// Start an engine using the configured backend and logging results
    /// through `tracing`.
    pub fn new(config: EngineConfig) -> Result<Self, NetError> {
        let resolver: Arc<dyn Resolve> = match config.backend {
            ResolverBackend::System => Arc::new(GaiResolver::new()),
            ResolverBackend::Hickory => Arc::new(HickoryResolver::new()),
        };
        Self::with_resolver(config, resolver, Arc::new(TracingSink))
    }

    /// Start an engine with an explicit provider and sink.
    pub fn with_resolver(
        config: EngineConfig,
        resolver: Arc<dyn Resolve>,
        sink: Arc<dyn ReportSink>,
    ) -> Result<Self, NetError> {
        let shared = Arc::new(Shared {
            queue: ResolutionQueue::new(),
            wake: Notify::new(),
            state: Mutex::new(EngineState::Running),
        });

        let worker = Worker {
            shared: Arc::clone(&shared),
            resolver,
            sink,
            timeout: config.timeout,
        };
        let context =
            ExecutionContext::start(&config.worker_name, move |shutdown| worker.run(shutdown))?;
        let worker_id = context.thread_id();

        tracing::debug!(
            timeout_ms = config.timeout.as_millis() as u64,
            "resolution engine started"
        );
        Ok(Self {
            shared,
            context: Mutex::new(Some(context)),
            worker_id,
            config,
        })
    }

    /// Queue `host` with the configured default service.
    pub fn add_host(&self, host: impl Into<Name>) -> Result<(), NetError> {
        self.add_host_with_service(host, self.config.default_service.clone())
    }

    /// Queue `host` for resolution against `service`.
    ///
    /// Returns [`NetError::EngineStopped`] once [`stop`](Self::stop) has
    /// begun; nothing is queued in that case.
    pub fn add_host_with_service(
        &self,
        host: impl Into<Name>,
        service: impl Into<Service>,
    ) -> Result<(), NetError> {
        if self.state() != EngineState::Running {
            return Err(NetError::EngineStopped);
        }
        let request = ResolutionRequest::new(host, service);
        if request.host.as_str().is_empty() {
            return Err(NetError::InvalidArgument);
        }

        tracing::info!(host = %request.host, service = %request.service, "host queued");
        self.shared.queue.enqueue(request);
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Drop every queued request for `host`. A lookup already in flight
    /// for it is unaffected.
    pub fn remove_host(&self, host: &str) -> usize {
        let removed = self.shared.queue.remove_all(host);
        if removed > 0 {
            tracing::info!(host = %host, removed, "host removed from queue");
        }
        removed
    }

    /// Hosts still waiting, oldest first.
    pub fn list_pending(&self) -> Vec<String> {
        self.shared.queue.snapshot()
    }

    pub fn state(&self) -> EngineState {
        *self.shared.state.lock()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shut the worker down and wait for it to exit.
    ///
    /// Only the first call does anything and returns `true`. Concurrent
    /// callers block until the worker has joined, then return `false`.
    /// A lookup in flight at this point is reported as
    /// [`ResolutionOutcome::Cancelled`]; queued requests are discarded
    /// without a report.
    pub fn stop(&self) -> bool {
        let mut context = if thread::current().id() == self.worker_id {
            // The worker cannot wait on a stop that is joining it.
            match self.context.try_lock() {
                Some(guard) => guard,
                None => return false,
            }
        } else {
            self.context.lock()
        };
        let Some(ctx) = context.take() else {
            return false;
        };

        *self.shared.state.lock() = EngineState::Stopping;
        tracing::info!(pending = self.shared.queue.len(), "stopping resolution engine");
        ctx.stop();
        *self.shared.state.lock() = EngineState::Stopped;
        true
    }
}

impl Drop for ResolutionEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ResolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionEngine")
            .field("state", &self.state())
            .field("pending", &self.shared.queue.len())
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

/// Far enough out that the timer never fires, near enough not to overflow.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline(started: Instant, timeout: Duration) -> Instant {
    started
        .checked_add(timeout)
        .unwrap_or_else(|| started + FAR_FUTURE)
}

/// Marks the engine stopped if the worker unwinds, so callers stop
/// queueing work nobody will drain.
struct ExitGuard<'a> {
    state: &'a Mutex<EngineState>,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            *self.state.lock() = EngineState::Stopped;
            tracing::error!("resolver worker panicked, engine stopped");
        }
    }
}

/// Everything the worker loop owns. Holding `shared` keeps the queue
/// alive for as long as the worker runs.
struct Worker {
    shared: Arc<Shared>,
    resolver: Arc<dyn Resolve>,
    sink: Arc<dyn ReportSink>,
    timeout: Duration,
}

impl Worker {
    async fn run(self, mut shutdown: Shutdown) {
        let _exit = ExitGuard {
            state: &self.shared.state,
        };

        // One timer, re-armed for every request.
        let timer = tokio::time::sleep_until(deadline(Instant::now(), self.timeout));
        tokio::pin!(timer);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.requested() => break,
                _ = self.shared.wake.notified() => {}
            }
            if !self.drain(timer.as_mut(), &mut shutdown).await {
                break;
            }
        }
    }

    /// Resolve queued requests until the queue is empty. Returns `false`
    /// when shutdown was requested.
    async fn drain(&self, mut timer: Pin<&mut Sleep>, shutdown: &mut Shutdown) -> bool {
        loop {
            if shutdown.is_requested() {
                return false;
            }
            let Some(request) = self.shared.queue.dequeue_front() else {
                return true;
            };
            let result = self.resolve_one(request, timer.as_mut(), shutdown).await;
            self.report(result);
        }
    }

    async fn resolve_one(
        &self,
        request: ResolutionRequest,
        timer: Pin<&mut Sleep>,
        shutdown: &mut Shutdown,
    ) -> ResolutionResult {
        let ResolutionRequest { host, service } = request;
        let started = Instant::now();

        let outcome = match service.port() {
            Err(e) => ResolutionOutcome::from_error(&e),
            Ok(port) => self.lookup(&host, port, started, timer, shutdown).await,
        };

        ResolutionResult {
            host: host.to_string(),
            service,
            outcome,
            elapsed: started.elapsed(),
        }
    }

    async fn lookup(
        &self,
        host: &Name,
        port: u16,
        started: Instant,
        mut timer: Pin<&mut Sleep>,
        shutdown: &mut Shutdown,
    ) -> ResolutionOutcome {
        tracing::debug!(host = %host, port, "starting resolution");
        timer.as_mut().reset(deadline(started, self.timeout));

        let started_lookup =
            panic::catch_unwind(AssertUnwindSafe(|| self.resolver.resolve(host.clone(), port)));
        let Ok(mut resolving) = started_lookup else {
            tracing::error!(host = %host, "resolver panicked");
            return ResolutionOutcome::OtherError("Resolver panicked".to_string());
        };

        let outcome = tokio::select! {
            biased;
            _ = shutdown.requested() => ResolutionOutcome::Cancelled,
            _ = timer.as_mut() => {
                tracing::debug!(host = %host, "resolution timed out, cancelling lookup");
                ResolutionOutcome::TimedOut
            }
            result = &mut resolving => match result {
                Ok(addrs) => ResolutionOutcome::Resolved(addrs.map(|addr| addr.ip()).collect()),
                Err(e) => ResolutionOutcome::from_error(&e),
            },
        };
        // Cancels the lookup if the timer or shutdown won.
        drop(resolving);
        outcome
    }

    fn report(&self, result: ResolutionResult) {
        let host = result.host.clone();
        if panic::catch_unwind(AssertUnwindSafe(|| self.sink.report(result))).is_err() {
            tracing::error!(host = %host, "report sink panicked");
        }
    }
}
