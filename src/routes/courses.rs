//! Course grid routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::carousel::storage_error_to_status;
use crate::schema;
use crate::state::AppState;
use crate::storage;
use crate::views::courses::CourseGrid;

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplaceCoursesResponse {
    pub saved: usize,
    pub dropped: usize,
}

/// `GET /api/courses?q=` — course grid. Storage failures render empty.
pub async fn list_courses(State(state): State<AppState>, Query(query): Query<CourseQuery>) -> Json<CourseGrid> {
    let grid = CourseGrid::fetch(state.storage.as_ref(), &state.config.images).await;
    Json(grid.filter(query.q.as_deref()))
}

/// `PUT /api/courses` — replace the category list wholesale. Malformed
/// entries are dropped before saving.
pub async fn replace_courses(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ReplaceCoursesResponse>, StatusCode> {
    let Some(submitted) = body.as_array().map(Vec::len) else {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    };
    let categories = schema::parse_course_categories(&body);
    storage::save_course_categories(state.storage.as_ref(), &categories)
        .await
        .map_err(storage_error_to_status)?;

    Ok(Json(ReplaceCoursesResponse { saved: categories.len(), dropped: submitted - categories.len() }))
}
