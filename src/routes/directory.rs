//! Member directory and project gallery routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::state::AppState;
use crate::views::projects::ProjectGallery;
use crate::views::users::{UserCard, UserDirectory};

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub tag: Option<String>,
}

/// `GET /api/users?q=` — member directory, optionally filtered.
pub async fn list_users(State(state): State<AppState>, Query(query): Query<DirectoryQuery>) -> Json<UserDirectory> {
    Json(UserDirectory::load(&state.config.images).filter(query.q.as_deref()))
}

/// `GET /api/users/{id}` — one member card.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<UserCard>, StatusCode> {
    UserDirectory::load(&state.config.images)
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/projects?tag=` — project gallery, optionally filtered by tag.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Json<ProjectGallery> {
    Json(ProjectGallery::load(&state.config.images).with_tag(query.tag.as_deref()))
}
