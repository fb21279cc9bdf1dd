//! Validated boundary types for stored resources.
//!
//! DESIGN
//! ======
//! Storage hands back untyped `serde_json::Value`s. Everything crossing into
//! the views is parsed here into `Slide`, `CourseCategory`, and
//! `CarouselConfig`. Malformed list entries are dropped (and logged) instead
//! of failing the whole list, so one bad record never blanks a page.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::ImageUrls;

/// Maximum number of images the home carousel holds.
pub const CAROUSEL_SLOTS: usize = 3;

// =============================================================================
// SLIDE
// =============================================================================

/// One carousel slide. Order within a slide list is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Slide {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(), alt_text: None }
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }
}

// =============================================================================
// CAROUSEL CONFIG
// =============================================================================

/// Persisted home carousel: up to three bare upload filenames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub images: Vec<String>,
}

impl CarouselConfig {
    /// Parse a stored value. Non-string entries become blank slots so later
    /// images keep their position, and the list is truncated to
    /// [`CAROUSEL_SLOTS`]. Anything that is not an object with
    /// an `images` array yields an empty config.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(items) = value.get("images").and_then(Value::as_array) else {
            if !value.is_null() {
                warn!("carousel config has no images array; treating as empty");
            }
            return Self::default();
        };

        let images = items
            .iter()
            .take(CAROUSEL_SLOTS)
            .map(|item| match item.as_str() {
                Some(name) => name.to_owned(),
                None => {
                    if !item.is_null() {
                        warn!(entry = %item, "blanking non-string carousel image");
                    }
                    String::new()
                }
            })
            .collect();

        Self { images }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({ "images": self.images })
    }

    /// Slides for display, one per stored reference. Empty references render
    /// the placeholder.
    #[must_use]
    pub fn slides(&self, urls: &ImageUrls) -> Vec<Slide> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, name)| Slide::new(resolve_image(Some(name), urls)).with_alt(format!("Slide {}", i + 1)))
            .collect()
    }
}

// =============================================================================
// COURSE CATEGORY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCategory {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    pub link: String,
}

impl CourseCategory {
    fn validate(self) -> Result<Self, &'static str> {
        if self.id.trim().is_empty() {
            return Err("empty id");
        }
        if self.title.trim().is_empty() {
            return Err("empty title");
        }
        if !is_link(&self.link) {
            return Err("invalid link");
        }
        Ok(self)
    }
}

fn is_link(link: &str) -> bool {
    link.starts_with('/') || link.starts_with("http://") || link.starts_with("https://")
}

/// Parse the stored `courseCategories` list, dropping malformed entries and
/// later duplicates of an id.
#[must_use]
pub fn parse_course_categories(value: &Value) -> Vec<CourseCategory> {
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            warn!("course categories value is not an array; treating as empty");
        }
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(items.len());
    for item in items {
        let parsed = serde_json::from_value::<CourseCategory>(item.clone())
            .map_err(|_| "shape mismatch")
            .and_then(CourseCategory::validate);
        match parsed {
            Ok(category) if seen.insert(category.id.clone()) => categories.push(category),
            Ok(category) => warn!(id = %category.id, "dropping duplicate course category"),
            Err(reason) => warn!(reason, entry = %item, "dropping malformed course category"),
        }
    }
    categories
}

// =============================================================================
// IMAGE REFERENCES
// =============================================================================

/// Resolve a stored image reference to a display URL: bare filenames are
/// prefixed with the uploads URL, absent or blank references get the
/// placeholder, and absolute URLs pass through.
#[must_use]
pub fn resolve_image(reference: Option<&str>, urls: &ImageUrls) -> String {
    match reference.map(str::trim) {
        None | Some("") => urls.placeholder.clone(),
        Some(r) if r.starts_with("http://") || r.starts_with("https://") || r.starts_with('/') => r.to_owned(),
        Some(r) => format!("{}/{}", urls.uploads_url, r),
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
