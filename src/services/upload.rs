//! Upload service — stores carousel/course images under the uploads dir.
//!
//! DESIGN
//! ======
//! Files are written under a generated name (`<uuid>.<ext>`) so uploads
//! never collide or escape the directory; the returned bare filename is what
//! admins then place into carousel slots. Only common web image extensions
//! are accepted, and the per-file size ceiling matches the admin editor's.

use std::path::Path;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("file name has no usable extension: {0:?}")]
    InvalidName(String),
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("upload is {size} bytes; limit is {max}")]
    TooLarge { size: u64, max: u64 },
    #[error("upload write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredUpload {
    /// Bare filename to persist in storage.
    pub name: String,
    pub size: u64,
}

/// Lowercased extension of `original` if it is an accepted image type.
///
/// # Errors
///
/// Returns [`UploadError::InvalidName`] or [`UploadError::UnsupportedType`].
pub fn image_extension(original: &str) -> Result<String, UploadError> {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| UploadError::InvalidName(original.to_owned()))?;
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(UploadError::UnsupportedType(ext))
    }
}

/// Validate and write one uploaded image.
///
/// # Errors
///
/// Returns an [`UploadError`] if the name, type, or size is rejected, or if
/// the file cannot be written.
pub async fn store_upload(dir: &Path, original: &str, bytes: &[u8], max_bytes: u64) -> Result<StoredUpload, UploadError> {
    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(UploadError::TooLarge { size, max: max_bytes });
    }
    let ext = image_extension(original)?;
    let name = format!("{}.{ext}", Uuid::new_v4());

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&name), bytes).await?;
    info!(%name, original, size, "upload stored");

    Ok(StoredUpload { name, size })
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
