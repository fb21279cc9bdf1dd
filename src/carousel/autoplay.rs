//! Autoplay driver — tokio interval task ticking a shared engine.
//!
//! DESIGN
//! ======
//! One task per running autoplay. Each tick takes the engine lock and calls
//! `advance(delay)`, so ticks never overlap with each other or with request
//! handlers navigating the same engine.
//!
//! Cancellation is synchronous: `cancel()` flips the token, then acquires
//! and releases the engine lock. A tick already holding the lock finishes
//! first; any later tick re-checks the token under the lock and exits. Once
//! `cancel()` returns, no further `select_next` is driven by this task.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::CarouselEngine;

pub type SharedCarousel = Arc<Mutex<CarouselEngine>>;

/// Lock a shared engine, recovering the guard if a listener panicked.
pub fn lock(engine: &SharedCarousel) -> MutexGuard<'_, CarouselEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct AutoplayDriver {
    engine: SharedCarousel,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl AutoplayDriver {
    /// Start ticking `engine` at its autoplay delay. Returns `None` when the
    /// engine has autoplay disabled.
    ///
    /// Must be called from within a tokio runtime, and not while holding the
    /// engine lock.
    #[must_use]
    pub fn spawn(engine: SharedCarousel) -> Option<Self> {
        let delay = lock(&engine).autoplay_delay()?;
        let token = CancellationToken::new();
        let handle = tokio::spawn(run(engine.clone(), delay, token.clone()));
        debug!(?delay, "carousel autoplay started");
        Some(Self { engine, token, handle })
    }

    /// Stop the driver. No tick is applied after this returns.
    pub fn cancel(&self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        drop(lock(&self.engine));
        self.handle.abort();
        debug!("carousel autoplay cancelled");
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for AutoplayDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run(engine: SharedCarousel, delay: Duration, token: CancellationToken) {
    let mut interval = tokio::time::interval_at(Instant::now() + delay, delay);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = token.cancelled() => break,
            _ = interval.tick() => {}
        }

        let keep_running = {
            let mut guard = lock(&engine);
            if token.is_cancelled() || guard.autoplay_delay() != Some(delay) {
                false
            } else {
                let fired = guard.advance(delay);
                trace!(fired, selected = ?guard.selected_index(), "carousel autoplay tick");
                true
            }
        };
        if !keep_running {
            break;
        }
    }
}

#[cfg(test)]
#[path = "autoplay_test.rs"]
mod tests;
