use crate::dns::{Name, Service};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A pending (host, service) pair waiting to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub host: Name,
    pub service: Service,
}

impl ResolutionRequest {
    pub fn new(host: impl Into<Name>, service: impl Into<Service>) -> Self {
        Self {
            host: host.into(),
            service: service.into(),
        }
    }
}

/// FIFO of pending requests shared between callers and the worker.
///
/// Every operation takes the same lock and does list work only; no
/// resolution happens while it is held. Requests handed out by
/// [`dequeue_front`](Self::dequeue_front) are no longer members, so
/// [`remove_all`](Self::remove_all) can never touch an in-flight lookup.
#[derive(Debug, Default)]
pub struct ResolutionQueue {
    pending: Mutex<VecDeque<ResolutionRequest>>,
}

impl ResolutionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request behind every request already queued.
    pub fn enqueue(&self, request: ResolutionRequest) {
        self.pending.lock().push_back(request);
    }

    /// Pop the oldest request.
    pub fn dequeue_front(&self) -> Option<ResolutionRequest> {
        self.pending.lock().pop_front()
    }

    /// Remove every queued request for `host`, returning how many were dropped.
    pub fn remove_all(&self, host: &str) -> usize {
        let mut pending = self.pending.lock();
        let before = pending.len();
        pending.retain(|request| request.host.as_str() != host);
        before - pending.len()
    }

    /// Copy of the queued host names, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.pending.lock().iter().map(|request| request.host.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
