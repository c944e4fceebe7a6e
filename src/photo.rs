//! Base64 profile photo decoding and on-disk storage.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Subdirectory of the media root holding account photos.
pub const PHOTO_DIR: &str = "Users";

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo is not valid base64")]
    Encoding(#[from] base64::DecodeError),

    #[error("photo is not a supported image (png, jpg, gif, webp, bmp)")]
    Format,

    #[error("failed to store photo: {0}")]
    Io(#[from] std::io::Error),
}

/// Image bytes with the file extension matching their format.
#[derive(Debug)]
pub struct DecodedPhoto {
    pub bytes: Vec<u8>,
    pub extension: &'static str,
}

/// Decode a base64 payload, optionally wrapped in a `data:` URI, and sniff
/// its image format from the content.
pub fn decode_photo(payload: &str) -> Result<DecodedPhoto, PhotoError> {
    let data = match payload.split_once(";base64,") {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => payload,
    };

    let bytes = STANDARD.decode(data.trim())?;
    let extension = match image::guess_format(&bytes).map_err(|_| PhotoError::Format)? {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpg",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        _ => return Err(PhotoError::Format),
    };

    debug!(size = bytes.len(), extension, "Decoded photo payload");
    Ok(DecodedPhoto { bytes, extension })
}

/// Random storage path for a photo, keeping only the extension.
pub fn randomized_path(extension: &str) -> String {
    format!("{}/{}.{}", PHOTO_DIR, Uuid::new_v4().simple(), extension)
}

/// Local file storage rooted at the configured media directory.
#[derive(Clone, Debug)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the photo under a random name and return its relative path.
    pub async fn save(&self, photo: &DecodedPhoto) -> Result<String, PhotoError> {
        let relative = randomized_path(photo.extension);
        let target = self.root.join(&relative);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &photo.bytes).await?;

        info!(path = %relative, "Stored photo");
        Ok(relative)
    }

    /// Remove a stored photo. Failures are logged, not returned.
    pub async fn remove(&self, relative: &str) {
        if let Err(e) = tokio::fs::remove_file(self.root.join(relative)).await {
            warn!(path = %relative, "Failed to remove photo: {}", e);
        }
    }
}
