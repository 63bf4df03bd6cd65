//! Trailing-edge debounce: a burst of calls collapses into one delayed
//! invocation carrying the last call's argument.

use std::{future::Future, sync::Arc, time::Duration};

use futures::{future::BoxFuture, FutureExt};
use tokio::{task::JoinHandle, time::Instant};
use tracing::trace;

type Action<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

/// Owns at most one pending invocation. Each [`Debouncer::call`] supersedes
/// the previous one and restarts the delay; dropping the debouncer cancels
/// whatever is still pending.
///
/// Calls must be made from within a tokio runtime.
pub struct Debouncer<A> {
    delay: Duration,
    action: Action<A>,
    pending: Option<JoinHandle<()>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            action: Arc::new(move |arg| action(arg).boxed()),
            pending: None,
        }
    }

    pub fn call(&mut self, arg: A) {
        let superseded = self.cancel();
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        let deadline = Instant::now() + delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            action(arg).await;
        }));
        trace!(delay_ms = delay.as_millis() as u64, superseded, "debounce scheduled");
    }

    /// Drops the pending invocation, including one that already fired and
    /// is still running. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/debounce_tests.rs"]
mod tests;
