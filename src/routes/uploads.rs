//! Image upload route.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::warn;

use crate::services::upload::{self, StoredUpload, UploadError};
use crate::state::AppState;

pub(crate) fn upload_error_to_status(err: &UploadError) -> StatusCode {
    match err {
        UploadError::InvalidName(_) => StatusCode::BAD_REQUEST,
        UploadError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `POST /api/uploads/{filename}` — raw image bytes in the body.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<StoredUpload>), StatusCode> {
    upload::store_upload(&state.config.uploads_dir, &filename, &body, state.config.max_upload_bytes)
        .await
        .map(|stored| (StatusCode::CREATED, Json(stored)))
        .map_err(|e| {
            warn!(error = %e, %filename, "upload rejected");
            upload_error_to_status(&e)
        })
}
