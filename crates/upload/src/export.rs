//! Download and share of the processed image.

use std::path::PathBuf;

use moodlens_protocol::{ImageRef, ImageRefError};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

/// Suggested file name for downloaded results.
pub const DOWNLOAD_FILE_NAME: &str = "processed_image.png";

/// Share target URI prefix (Instagram story camera).
const INSTAGRAM_STORY_URI: &str = "instagram://story-camera?image=";

/// Characters `encodeURIComponent` leaves as-is.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Errors from saving a downloaded image.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid image reference: {0}")]
    ImageRef(#[from] ImageRefError),

    #[error("remote image cannot be saved by this sink: {0}")]
    Remote(String),
}

/// Receives "save this image" requests (browser download, file dialog).
pub trait DownloadSink: Send + Sync {
    /// Saves `image` (a displayable reference) under `file_name`.
    fn save(&self, file_name: &str, image: &str) -> Result<(), DownloadError>;
}

/// Opens external share targets by URI.
///
/// Failures of the target are not reported back.
pub trait ShareTarget: Send + Sync {
    fn open(&self, uri: &str);
}

/// Builds the share URI for `image`.
pub fn instagram_story_uri(image: &str) -> String {
    format!(
        "{INSTAGRAM_STORY_URI}{}",
        utf8_percent_encode(image, URI_COMPONENT)
    )
}

/// Writes inline images into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    dir: PathBuf,
}

impl DirectoryDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloadSink {
    fn save(&self, file_name: &str, image: &str) -> Result<(), DownloadError> {
        let bytes = match ImageRef::parse(image)? {
            ImageRef::Inline { bytes, .. } => bytes,
            ImageRef::Remote(url) => return Err(DownloadError::Remote(url)),
        };
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "image saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_uri_matches_uri_component_encoding() {
        let uri = instagram_story_uri("data:image/png;base64,AB+/=");
        assert_eq!(
            uri,
            "instagram://story-camera?image=data%3Aimage%2Fpng%3Bbase64%2CAB%2B%2F%3D"
        );
        assert_eq!(
            instagram_story_uri("a-b_c.d!e~f*g'h(i)"),
            "instagram://story-camera?image=a-b_c.d!e~f*g'h(i)"
        );
    }

    #[test]
    fn directory_sink_writes_inline_image() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloadSink::new(dir.path().join("out"));

        sink.save(DOWNLOAD_FILE_NAME, "data:image/png;base64,AQID")
            .unwrap();

        let written = std::fs::read(dir.path().join("out").join(DOWNLOAD_FILE_NAME)).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[test]
    fn directory_sink_rejects_remote_image() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloadSink::new(dir.path());

        let err = sink
            .save(DOWNLOAD_FILE_NAME, "https://cdn.example.com/out.png")
            .unwrap_err();
        assert!(matches!(err, DownloadError::Remote(_)));
    }

    #[test]
    fn directory_sink_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectoryDownloadSink::new(dir.path());

        let err = sink.save(DOWNLOAD_FILE_NAME, "data:image/png;base64,@@@").unwrap_err();
        assert!(matches!(err, DownloadError::ImageRef(_)));
    }
}
