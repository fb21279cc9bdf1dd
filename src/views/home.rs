//! Home carousel — the long-lived view behind the landing page slider.
//!
//! DESIGN
//! ======
//! Owns one shared `CarouselEngine` plus the `AutoplayDriver` ticking it.
//! `reload()` fetches the stored carousel inside the view's `ViewScope` and
//! reinitializes the engine with the derived slides; the driver is
//! restarted around every reinitialization so its interval always matches
//! the engine's delay. `teardown()` invalidates the scope, stops autoplay,
//! and clears listeners; nothing touches the engine afterwards.
//!
//! Lock order: the driver slot is never held while taking the engine lock
//! for a reinitialization, and the engine lock is never held while a driver
//! is dropped (dropping a driver takes the engine lock).

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::ViewScope;
use crate::carousel::autoplay::lock;
use crate::carousel::{AutoplayDriver, CarouselEngine, CarouselOptions, CarouselSnapshot, SharedCarousel};
use crate::config::ImageUrls;
use crate::schema::CarouselConfig;
use crate::storage::{self, StorageClient};

#[derive(Clone)]
pub struct HomeCarousel {
    inner: Arc<HomeInner>,
}

struct HomeInner {
    engine: SharedCarousel,
    driver: Mutex<Option<AutoplayDriver>>,
    scope: ViewScope,
    options: CarouselOptions,
    urls: ImageUrls,
}

impl HomeCarousel {
    /// Create an EMPTY home carousel. Slides arrive via `reload` or
    /// `apply_config`.
    #[must_use]
    pub fn new(options: CarouselOptions, urls: ImageUrls) -> Self {
        let mut engine = CarouselEngine::new();
        engine.on_selection_changed(|index| debug!(index, "home carousel selection changed"));
        Self {
            inner: Arc::new(HomeInner {
                engine: Arc::new(Mutex::new(engine)),
                driver: Mutex::new(None),
                scope: ViewScope::new(),
                options,
                urls,
            }),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &SharedCarousel {
        &self.inner.engine
    }

    /// Fetch the stored carousel and reinitialize. A failed fetch keeps the
    /// current slides. The task resolves to whether new slides were applied.
    pub fn reload(&self, store: Arc<dyn StorageClient>) -> JoinHandle<bool> {
        let view = self.clone();
        self.inner.scope.spawn_fetch(
            "home_carousel",
            async move { storage::load_carousel(store.as_ref()).await },
            move |config| view.reinitialize(&config),
        )
    }

    /// `reload` and wait for it. Returns whether slides were applied; a
    /// failed or panicked fetch is logged and leaves the carousel as it was.
    pub async fn preload(&self, store: Arc<dyn StorageClient>) -> bool {
        match self.reload(store).await {
            Ok(true) => true,
            Ok(false) => {
                warn!("home carousel preload not applied");
                false
            }
            Err(e) => {
                warn!(error = %e, "home carousel preload task failed");
                false
            }
        }
    }

    /// Reinitialize from an already-known config (e.g. right after an admin
    /// save). Ignored after teardown.
    pub fn apply_config(&self, config: &CarouselConfig) -> bool {
        self.inner.scope.apply(|| self.reinitialize(config)).is_some()
    }

    fn reinitialize(&self, config: &CarouselConfig) {
        let slides = config.slides(&self.inner.urls);
        let count = slides.len();

        let previous = self.driver_slot().take();
        drop(previous);

        lock(&self.inner.engine).initialize(slides, self.inner.options.clone());

        let driver = AutoplayDriver::spawn(self.inner.engine.clone());
        *self.driver_slot() = driver;
        info!(slides = count, "home carousel reloaded");
    }

    fn driver_slot(&self) -> std::sync::MutexGuard<'_, Option<AutoplayDriver>> {
        self.inner.driver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Navigation ---

    #[must_use]
    pub fn snapshot(&self) -> CarouselSnapshot {
        lock(&self.inner.engine).snapshot()
    }

    pub fn select_next(&self) -> CarouselSnapshot {
        let mut engine = lock(&self.inner.engine);
        engine.select_next();
        engine.snapshot()
    }

    pub fn select_previous(&self) -> CarouselSnapshot {
        let mut engine = lock(&self.inner.engine);
        engine.select_previous();
        engine.snapshot()
    }

    pub fn select_index(&self, index: usize) -> CarouselSnapshot {
        let mut engine = lock(&self.inner.engine);
        engine.select_index(index);
        engine.snapshot()
    }

    /// Tear the view down: pending fetches are discarded, autoplay stops,
    /// listeners are dropped.
    pub fn teardown(&self) {
        self.inner.scope.teardown();
        let driver = self.driver_slot().take();
        drop(driver);
        lock(&self.inner.engine).teardown();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.scope.is_active()
    }
}

#[cfg(test)]
#[path = "home_test.rs"]
mod tests;
