//! Carousel admin editor — three image slots saved wholesale.
//!
//! DESIGN
//! ======
//! The editor is filled from the stored config when it mounts, then edited
//! locally: each file selection is checked against the per-file size
//! ceiling before it enters a slot, so an oversized file leaves the slot
//! exactly as it was. `save()` drops empty slots and writes the remaining
//! filenames in slot order with one `set("carousel", ...)`.
//!
//! ERROR HANDLING
//! ==============
//! A failed save is returned once to the caller; nothing is retried and the
//! editor keeps its local slots so the admin can save again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::schema::{CAROUSEL_SLOTS, CarouselConfig};
use crate::storage::{self, StorageClient, StorageError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSelection {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("slot {0} is out of range (0..3)")]
    SlotOutOfRange(usize),
    #[error("file {name:?} is {size} bytes; limit is {max}")]
    FileTooLarge { name: String, size: u64, max: u64 },
    #[error("file name is empty")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselEditor {
    slots: [Option<String>; CAROUSEL_SLOTS],
    max_file_bytes: u64,
}

impl CarouselEditor {
    #[must_use]
    pub fn new(max_file_bytes: u64) -> Self {
        Self { slots: Default::default(), max_file_bytes }
    }

    /// Fill slots in order from a stored config. Blank references stay empty.
    #[must_use]
    pub fn from_config(config: &CarouselConfig, max_file_bytes: u64) -> Self {
        let mut editor = Self::new(max_file_bytes);
        for (slot, name) in editor.slots.iter_mut().zip(&config.images) {
            *slot = Some(name.trim().to_owned()).filter(|n| !n.is_empty());
        }
        editor
    }

    /// Mount the editor from storage. A failed fetch starts with empty slots.
    pub async fn load(store: &dyn StorageClient, max_file_bytes: u64) -> Self {
        match storage::load_carousel(store).await {
            Ok(config) => Self::from_config(&config, max_file_bytes),
            Err(e) => {
                warn!(error = %e, "carousel fetch failed; editor starts empty");
                Self::new(max_file_bytes)
            }
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Put `file` into `slot`. Rejected selections leave the slot unchanged.
    ///
    /// # Errors
    ///
    /// Returns an [`EditorError`] for an out-of-range slot, an empty file
    /// name, or a file over the size ceiling.
    pub fn select_file(&mut self, slot: usize, file: &FileSelection) -> Result<(), EditorError> {
        if slot >= CAROUSEL_SLOTS {
            return Err(EditorError::SlotOutOfRange(slot));
        }
        if file.size > self.max_file_bytes {
            debug!(slot, name = %file.name, size = file.size, "rejecting oversized carousel image");
            return Err(EditorError::FileTooLarge { name: file.name.clone(), size: file.size, max: self.max_file_bytes });
        }
        let name = bare_file_name(&file.name);
        if name.is_empty() {
            return Err(EditorError::EmptyName);
        }
        self.slots[slot] = Some(name.to_owned());
        Ok(())
    }

    /// Empty `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::SlotOutOfRange`] for an invalid slot.
    pub fn clear_slot(&mut self, slot: usize) -> Result<(), EditorError> {
        let target = self.slots.get_mut(slot).ok_or(EditorError::SlotOutOfRange(slot))?;
        *target = None;
        Ok(())
    }

    /// Filled slots in slot order.
    #[must_use]
    pub fn images(&self) -> Vec<String> {
        self.slots.iter().flatten().cloned().collect()
    }

    /// Persist the filled slots wholesale.
    ///
    /// # Errors
    ///
    /// Returns the [`StorageError`] from the single write attempt.
    pub async fn save(&self, store: &dyn StorageClient) -> Result<CarouselConfig, StorageError> {
        let config = CarouselConfig { images: self.images() };
        storage::save_carousel(store, &config).await?;
        info!(images = config.images.len(), "carousel saved");
        Ok(config)
    }
}

/// Strip any directory part a browser may include in a file name.
fn bare_file_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or_default().trim()
}

#[cfg(test)]
#[path = "carousel_admin_test.rs"]
mod tests;
