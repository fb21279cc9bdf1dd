//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API consumed by the site's pages, serves
//! uploaded images as static files under the configured uploads URL, and
//! exposes a health check. Handlers stay thin: views and services do the
//! work, handlers translate to `StatusCode` + `Json`.

pub mod carousel;
pub mod courses;
pub mod directory;
pub mod uploads;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = usize::try_from(state.config.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    let uploads_url = mount_path(&state.config.images.uploads_url);
    let uploads_dir = ServeDir::new(&state.config.uploads_dir);

    let api = Router::new()
        .route("/api/users", get(directory::list_users))
        .route("/api/users/{id}", get(directory::get_user))
        .route("/api/projects", get(directory::list_projects))
        .route("/api/courses", get(courses::list_courses).put(courses::replace_courses))
        .route("/api/carousel", get(carousel::get_config).put(carousel::save_config))
        .route("/api/carousel/state", get(carousel::get_state))
        .route("/api/carousel/next", post(carousel::select_next))
        .route("/api/carousel/previous", post(carousel::select_previous))
        .route("/api/carousel/select/{index}", post(carousel::select_index))
        .route(
            "/api/uploads/{filename}",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/healthz", get(healthz))
        .with_state(state);

    let router = match uploads_url {
        Some(path) => api.nest_service(&path, uploads_dir),
        None => api,
    };

    router
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Local mount point for uploaded files. Absolute URLs (a CDN) are served
/// elsewhere, so nothing is mounted for them.
fn mount_path(uploads_url: &str) -> Option<String> {
    let path = uploads_url.trim_end_matches('/');
    (path.starts_with('/') && path.len() > 1).then(|| path.to_owned())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
