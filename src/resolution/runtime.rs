//! The engine's execution context: one worker thread driving a
//! current-thread tokio runtime.

use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::future::Future;
use std::thread::{self, JoinHandle, ThreadId};
use tokio::sync::watch;

/// Keeps the worker's event loop alive until released.
///
/// The loop keeps waiting for work while the guard exists; releasing or
/// dropping it asks the loop to finish.
#[derive(Debug)]
pub(crate) struct KeepAlive {
    tx: watch::Sender<bool>,
}

impl KeepAlive {
    fn new() -> (Self, Shutdown) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, Shutdown { rx })
    }

    pub(crate) fn release(self) {
        let _ = self.tx.send(true);
    }
}

/// Worker-side view of the keep-alive guard.
#[derive(Debug, Clone)]
pub(crate) struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Completes once the guard has been released or dropped.
    pub(crate) async fn requested(&mut self) {
        // An Err means the sender is gone, which is also a shutdown.
        let _ = self.rx.wait_for(|stop| *stop).await;
    }

    pub(crate) fn is_requested(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }
}

/// A running worker thread plus the guard keeping its loop alive.
#[derive(Debug)]
pub(crate) struct ExecutionContext {
    keep_alive: KeepAlive,
    thread: JoinHandle<()>,
}

impl ExecutionContext {
    /// Build the runtime and start the worker thread running `main`.
    ///
    /// Both steps happen before this returns, so a failure to start is a
    /// construction error instead of a silently dead engine.
    pub(crate) fn start<F, Fut>(name: &str, main: F) -> Result<Self, NetError>
    where
        F: FnOnce(Shutdown) -> Fut + Send + 'static,
        Fut: Future<Output = ()>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .worker_context()?;
        let (keep_alive, shutdown) = KeepAlive::new();

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                tracing::debug!("resolver worker started");
                runtime.block_on(main(shutdown));
                tracing::debug!("resolver worker finished");
            })
            .worker_context()?;

        Ok(Self { keep_alive, thread })
    }

    pub(crate) fn thread_id(&self) -> ThreadId {
        self.thread.thread().id()
    }

    /// Release the keep-alive guard and wait for the worker to exit.
    ///
    /// When called from the worker itself the thread cannot be joined;
    /// the loop still exits once control returns to it.
    pub(crate) fn stop(self) {
        let Self { keep_alive, thread } = self;
        keep_alive.release();

        if thread.thread().id() == thread::current().id() {
            tracing::debug!("stop requested from worker thread, detaching");
            return;
        }
        if thread.join().is_err() {
            tracing::error!("resolver worker panicked");
        }
    }
}
