//! Home carousel routes: stored config, admin save, live navigation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::carousel::CarouselSnapshot;
use crate::schema::{CAROUSEL_SLOTS, CarouselConfig};
use crate::state::AppState;
use crate::storage::{self, StorageError};
use crate::views::carousel_admin::{CarouselEditor, FileSelection};

/// One slot edit in an admin save.
///
/// On the wire a slot is `null` (keep), a bare `{ name, size }` selection,
/// or an explicit `{ "action": "keep" | "select" | "clear", ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "SlotInput")]
pub enum SlotUpdate {
    Keep,
    Select(FileSelection),
    Clear,
}

#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum SlotAction {
    Keep,
    Select(FileSelection),
    Clear,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BareSelection {
    name: String,
    size: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotInput {
    Keep(()),
    Selection(BareSelection),
    Action(SlotAction),
}

impl From<SlotInput> for SlotUpdate {
    fn from(input: SlotInput) -> Self {
        match input {
            SlotInput::Keep(()) | SlotInput::Action(SlotAction::Keep) => Self::Keep,
            SlotInput::Selection(BareSelection { name, size }) => Self::Select(FileSelection { name, size }),
            SlotInput::Action(SlotAction::Select(file)) => Self::Select(file),
            SlotInput::Action(SlotAction::Clear) => Self::Clear,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveCarouselBody {
    pub slots: Vec<SlotUpdate>,
}

#[derive(Debug, Serialize)]
pub struct RejectedSlot {
    pub slot: usize,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct SaveCarouselResponse {
    pub images: Vec<String>,
    pub rejected: Vec<RejectedSlot>,
}

pub(crate) fn storage_error_to_status(err: StorageError) -> StatusCode {
    warn!(error = %err, "storage write failed");
    StatusCode::SERVICE_UNAVAILABLE
}

/// `GET /api/carousel` — stored config.
pub async fn get_config(State(state): State<AppState>) -> Result<Json<CarouselConfig>, StatusCode> {
    storage::load_carousel(state.storage.as_ref())
        .await
        .map(Json)
        .map_err(storage_error_to_status)
}

/// `PUT /api/carousel` — apply slot edits to the stored config and save it
/// wholesale. Rejected selections keep their slot's previous value.
pub async fn save_config(
    State(state): State<AppState>,
    Json(body): Json<SaveCarouselBody>,
) -> Result<Json<SaveCarouselResponse>, StatusCode> {
    if body.slots.len() > CAROUSEL_SLOTS {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut editor = CarouselEditor::load(state.storage.as_ref(), state.config.max_upload_bytes).await;
    let mut rejected = Vec::new();
    for (slot, update) in body.slots.iter().enumerate() {
        let result = match update {
            SlotUpdate::Keep => Ok(()),
            SlotUpdate::Select(file) => editor.select_file(slot, file),
            SlotUpdate::Clear => editor.clear_slot(slot),
        };
        if let Err(e) = result {
            debug!(slot, error = %e, "carousel slot edit rejected");
            rejected.push(RejectedSlot { slot, reason: e.to_string() });
        }
    }

    let config = editor
        .save(state.storage.as_ref())
        .await
        .map_err(storage_error_to_status)?;
    state.home.apply_config(&config);

    Ok(Json(SaveCarouselResponse { images: config.images, rejected }))
}

/// `GET /api/carousel/state` — live home carousel.
pub async fn get_state(State(state): State<AppState>) -> Json<CarouselSnapshot> {
    Json(state.home.snapshot())
}

/// `POST /api/carousel/next`
pub async fn select_next(State(state): State<AppState>) -> Json<CarouselSnapshot> {
    Json(state.home.select_next())
}

/// `POST /api/carousel/previous`
pub async fn select_previous(State(state): State<AppState>) -> Json<CarouselSnapshot> {
    Json(state.home.select_previous())
}

/// `POST /api/carousel/select/{index}` — out-of-range indices leave the
/// selection unchanged.
pub async fn select_index(State(state): State<AppState>, Path(index): Path<usize>) -> Json<CarouselSnapshot> {
    Json(state.home.select_index(index))
}

#[cfg(test)]
#[path = "carousel_test.rs"]
mod tests;
