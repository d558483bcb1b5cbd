use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{AppError, Result};
use crate::shared::constants::DEFAULT_IMAGE_MIME_TYPE;
use crate::shared::validation::DATA_URL_HEADER_REGEX;

/// Image attached to a repair request.
///
/// Stored exactly as provided, normally a `data:<mime>;base64,<data>` URL. Nothing in
/// the triage core decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    /// Build a data URL from raw image bytes
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self::new(format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)))
    }

    /// Read an image file and encode it, inferring the mime type from the extension
    pub async fn from_file(path: &Path) -> Result<Self> {
        let mime_type = mime_type_for_path(path).ok_or_else(|| {
            AppError::Validation(format!("Unsupported image type: {}", path.display()))
        })?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!("Failed to read image {}: {:?}", path.display(), e);
            AppError::NotFound(format!("Cannot read image {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            "Encoded image {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );

        Ok(Self::from_bytes(&bytes, mime_type))
    }

    /// Declared mime type, or JPEG when the payload carries no data-URL header
    pub fn mime_type(&self) -> &str {
        DATA_URL_HEADER_REGEX
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
    }

    /// The base64 body with any data-URL header removed
    pub fn base64_data(&self) -> &str {
        match self.0.split_once(',') {
            Some((_, data)) if !data.is_empty() => data,
            _ => &self.0,
        }
    }
}

fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime)
}
