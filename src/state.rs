//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the storage client, the parsed configuration, and the one
//! long-lived view: the home carousel. Request-scoped views are built per
//! request from these.

use std::sync::Arc;

use crate::carousel::{Align, CarouselOptions};
use crate::config::AppConfig;
use crate::storage::StorageClient;
use crate::views::home::HomeCarousel;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageClient>,
    pub config: Arc<AppConfig>,
    pub home: HomeCarousel,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<dyn StorageClient>, config: AppConfig) -> Self {
        let home = HomeCarousel::new(home_carousel_options(&config), config.images.clone());
        Self { storage, config: Arc::new(config), home }
    }
}

/// Landing-page slider: centered, dots and arrows shown.
#[must_use]
pub fn home_carousel_options(config: &AppConfig) -> CarouselOptions {
    CarouselOptions {
        wrap: config.carousel_loop,
        align: Align::Center,
        autoplay_delay_ms: Some(config.carousel_autoplay_ms),
        show_pagination: true,
        show_navigation: true,
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::storage::MemoryStore;

    /// Test config: autoplay off, uploads in a fresh temp directory.
    #[must_use]
    pub fn test_config() -> AppConfig {
        AppConfig {
            carousel_autoplay_ms: 0,
            uploads_dir: std::env::temp_dir().join(format!("studyhall-test-{}", uuid::Uuid::new_v4())),
            ..AppConfig::default()
        }
    }

    /// Create a test `AppState` over an empty `MemoryStore`.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), test_config())
    }

    /// Create a test `AppState` over the given store.
    #[must_use]
    pub fn test_app_state_with(storage: Arc<dyn StorageClient>) -> AppState {
        AppState::new(storage, test_config())
    }
}
