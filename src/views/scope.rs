//! Cancellation scope for fetch-then-apply view updates.
//!
//! DESIGN
//! ======
//! A `ViewScope` pairs a `CancellationToken` with an apply gate. Completion
//! callbacks run under the gate and only while the token is live;
//! `teardown()` cancels the token under the same gate. Together that makes
//! teardown synchronous: once it returns, no callback applies, and an
//! in-flight fetch is dropped at its next suspension point.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::storage::StorageError;

#[derive(Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
    gate: Arc<Mutex<()>>,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Run `f` if the scope is still active. Returns `None` after teardown.
    pub fn apply<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if self.token.is_cancelled() {
            return None;
        }
        Some(f())
    }

    /// Invalidate the scope. Waits for an apply already in progress.
    pub fn teardown(&self) {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        self.token.cancel();
    }

    /// Spawn `fetch` and hand its result to `apply` if the scope is still
    /// active on completion. Fetch failures are logged and leave prior state
    /// untouched. The task resolves to whether `apply` ran.
    pub fn spawn_fetch<T, F, A>(&self, view: &'static str, fetch: F, apply: A) -> JoinHandle<bool>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, StorageError>> + Send + 'static,
        A: FnOnce(T) + Send + 'static,
    {
        let scope = self.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                () = scope.token.cancelled() => {
                    debug!(view, "fetch abandoned after teardown");
                    return false;
                }
                result = fetch => result,
            };

            match result {
                Ok(value) => scope.apply(|| apply(value)).is_some(),
                Err(e) => {
                    warn!(view, error = %e, "fetch failed; keeping prior state");
                    false
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
