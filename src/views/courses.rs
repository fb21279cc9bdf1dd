//! Course grid — categories fetched from storage, rendered as cards.

use serde::Serialize;
use tracing::warn;

use super::matches_query;
use crate::config::ImageUrls;
use crate::schema::{CourseCategory, resolve_image};
use crate::storage::{self, StorageClient};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCard {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseGrid {
    pub courses: Vec<CourseCard>,
}

impl CourseGrid {
    #[must_use]
    pub fn from_categories(categories: &[CourseCategory], urls: &ImageUrls) -> Self {
        let courses = categories
            .iter()
            .map(|c| CourseCard {
                id: c.id.clone(),
                title: c.title.clone(),
                image_url: resolve_image(c.image_ref.as_deref(), urls),
                link: c.link.clone(),
            })
            .collect();
        Self { courses }
    }

    /// Fetch `courseCategories` and build the grid. A failed fetch renders
    /// an empty grid.
    pub async fn fetch(store: &dyn StorageClient, urls: &ImageUrls) -> Self {
        match storage::load_course_categories(store).await {
            Ok(categories) => Self::from_categories(&categories, urls),
            Err(e) => {
                warn!(error = %e, "course categories fetch failed; rendering empty grid");
                Self::default()
            }
        }
    }

    /// Keep courses whose title contains `query`.
    #[must_use]
    pub fn filter(mut self, query: Option<&str>) -> Self {
        self.courses.retain(|c| matches_query(&[c.title.as_str()], query));
        self
    }
}

#[cfg(test)]
#[path = "courses_test.rs"]
mod tests;
