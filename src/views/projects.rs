//! Project gallery — static showcase filtered by tag.

use serde::Serialize;

use crate::config::ImageUrls;
use crate::schema::resolve_image;

struct Project {
    id: &'static str,
    title: &'static str,
    author_id: &'static str,
    summary: &'static str,
    tags: &'static [&'static str],
    cover: Option<&'static str>,
    link: &'static str,
}

const SHOWCASE: &[Project] = &[
    Project {
        id: "pocket-budget",
        title: "Pocket Budget",
        author_id: "priya-raman",
        summary: "Envelope budgeting with monthly rollover.",
        tags: &["web", "finance"],
        cover: Some("pocket-budget.png"),
        link: "/projects/pocket-budget",
    },
    Project {
        id: "transit-pulse",
        title: "Transit Pulse",
        author_id: "mei-tanaka",
        summary: "Notebook exploring bus punctuality by route and hour.",
        tags: &["data", "python"],
        cover: None,
        link: "/projects/transit-pulse",
    },
    Project {
        id: "study-timer",
        title: "Study Timer",
        author_id: "jonas-berg",
        summary: "Pomodoro timer with session history.",
        tags: &["web", "frontend"],
        cover: Some("study-timer.png"),
        link: "/projects/study-timer",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub cover_url: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectGallery {
    pub projects: Vec<ProjectCard>,
}

impl ProjectGallery {
    #[must_use]
    pub fn load(urls: &ImageUrls) -> Self {
        let projects = SHOWCASE
            .iter()
            .map(|p| ProjectCard {
                id: p.id.to_owned(),
                title: p.title.to_owned(),
                author_id: p.author_id.to_owned(),
                summary: p.summary.to_owned(),
                tags: p.tags.iter().map(|t| (*t).to_owned()).collect(),
                cover_url: resolve_image(p.cover, urls),
                link: p.link.to_owned(),
            })
            .collect();
        Self { projects }
    }

    /// Keep projects carrying `tag` (case-insensitive). `None` keeps all.
    #[must_use]
    pub fn with_tag(mut self, tag: Option<&str>) -> Self {
        if let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) {
            self.projects.retain(|p| p.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)));
        }
        self
    }
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
