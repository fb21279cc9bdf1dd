//! Storage client — opaque key-value persistence for site resources.
//!
//! DESIGN
//! ======
//! Views never talk to a backend directly; they go through the
//! `StorageClient` trait so tests can swap in `MemoryStore` (or a failing
//! double). Values are whole JSON documents: `set` replaces the stored value
//! wholesale, last writer wins, no partial writes.
//!
//! ERROR HANDLING
//! ==============
//! A failed `set` is returned to the caller once, with no retry. Reads that
//! fail are reported the same way; views decide to degrade to empty state.

pub mod memory;
pub mod postgres;

use std::fmt;

use serde_json::Value;

use crate::schema::{self, CarouselConfig, CourseCategory};

pub use memory::MemoryStore;
pub use postgres::PgStore;

// =============================================================================
// TYPES
// =============================================================================

/// Logical resources the site persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Carousel,
    CourseCategories,
}

impl ResourceKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Carousel => "carousel",
            Self::CourseCategories => "courseCategories",
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Provider-neutral async key-value store. Enables mocking in tests.
#[async_trait::async_trait]
pub trait StorageClient: Send + Sync {
    /// Fetch the stored value for `key`, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    async fn get(&self, key: ResourceKey) -> Result<Option<Value>, StorageError>;

    /// Replace the stored value for `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write did not happen.
    async fn set(&self, key: ResourceKey, value: Value) -> Result<(), StorageError>;
}

// =============================================================================
// TYPED HELPERS
// =============================================================================

/// Load the home carousel config; absent resolves to an empty config.
///
/// # Errors
///
/// Returns a [`StorageError`] if the backend read fails.
pub async fn load_carousel(store: &dyn StorageClient) -> Result<CarouselConfig, StorageError> {
    let value = store.get(ResourceKey::Carousel).await?;
    Ok(value.map(|v| CarouselConfig::from_value(&v)).unwrap_or_default())
}

/// Persist the home carousel config wholesale.
///
/// # Errors
///
/// Returns a [`StorageError`] if the write fails.
pub async fn save_carousel(store: &dyn StorageClient, config: &CarouselConfig) -> Result<(), StorageError> {
    store.set(ResourceKey::Carousel, config.to_value()).await
}

/// Load and validate the course category list; absent resolves to empty.
///
/// # Errors
///
/// Returns a [`StorageError`] if the backend read fails.
pub async fn load_course_categories(store: &dyn StorageClient) -> Result<Vec<CourseCategory>, StorageError> {
    let value = store.get(ResourceKey::CourseCategories).await?;
    Ok(value.map(|v| schema::parse_course_categories(&v)).unwrap_or_default())
}

/// Persist the course category list wholesale.
///
/// # Errors
///
/// Returns a [`StorageError`] if serialization or the write fails.
pub async fn save_course_categories(
    store: &dyn StorageClient,
    categories: &[CourseCategory],
) -> Result<(), StorageError> {
    let value = serde_json::to_value(categories).map_err(|e| StorageError::Unavailable(e.to_string()))?;
    store.set(ResourceKey::CourseCategories, value).await
}

// =============================================================================
// TEST DOUBLES
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
