//! Local media selection.
//!
//! A [`MediaSource`] produces a [`MediaBlob`] (file picker, camera capture).
//! Only blobs with an `image/*` MIME type become [`SelectedMedia`].

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use moodlens_service_client::ImageFile;
use tracing::debug;

/// MIME type reported when neither the content nor the extension is known.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Errors from reading or validating media.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an image: {mime}")]
    NotAnImage { mime: String },
}

/// Raw bytes picked by the user, with their declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub file_name: Option<String>,
}

impl MediaBlob {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Whether the declared MIME type is `image/*`.
    pub fn is_image(&self) -> bool {
        let mime = self.mime.trim().to_ascii_lowercase();
        mime.strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty())
    }
}

/// A validated image selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMedia(MediaBlob);

impl SelectedMedia {
    pub fn bytes(&self) -> &[u8] {
        &self.0.bytes
    }

    pub fn mime(&self) -> &str {
        &self.0.mime
    }

    /// File name sent with the multipart part. Falls back to
    /// `upload.<subtype>` when the source had no name.
    pub fn file_name(&self) -> String {
        match &self.0.file_name {
            Some(name) => name.clone(),
            None => {
                let subtype = self.0.mime.split_once('/').map_or("bin", |(_, s)| s);
                format!("upload.{subtype}")
            }
        }
    }

    /// Multipart payload for the detection request.
    pub fn to_image_file(&self) -> ImageFile {
        ImageFile {
            file_name: self.file_name(),
            mime: self.0.mime.clone(),
            bytes: self.0.bytes.clone(),
        }
    }
}

impl TryFrom<MediaBlob> for SelectedMedia {
    type Error = MediaError;

    fn try_from(blob: MediaBlob) -> Result<Self, Self::Error> {
        if blob.is_image() {
            Ok(SelectedMedia(blob))
        } else {
            Err(MediaError::NotAnImage { mime: blob.mime })
        }
    }
}

/// Something the user can pick media from.
pub trait MediaSource: Send + Sync {
    /// Reads the picked media.
    fn load(&self) -> Pin<Box<dyn Future<Output = Result<MediaBlob, MediaError>> + Send + '_>>;
}

/// Media read from a local file.
///
/// The MIME type is sniffed from the content, falling back to the file
/// extension.
#[derive(Debug, Clone)]
pub struct FileMediaSource {
    path: PathBuf,
}

impl FileMediaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MediaSource for FileMediaSource {
    fn load(&self) -> Pin<Box<dyn Future<Output = Result<MediaBlob, MediaError>> + Send + '_>> {
        Box::pin(async move {
            let bytes = tokio::fs::read(&self.path).await?;
            let mime = sniff_mime(&bytes)
                .or_else(|| detect_content_type(&self.path))
                .unwrap_or(UNKNOWN_MIME);
            debug!(path = %self.path.display(), mime, bytes = bytes.len(), "media loaded");

            let mut blob = MediaBlob::new(bytes, mime);
            blob.file_name = self
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string);
            Ok(blob)
        })
    }
}

/// MIME type from the image's magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Detects MIME content type from a file path extension.
pub fn detect_content_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("webp") => Some("image/webp"),
        Some("gif") => Some("image/gif"),
        Some("bmp") => Some("image/bmp"),
        Some("heic") => Some("image/heic"),
        _ => None,
    }
}
