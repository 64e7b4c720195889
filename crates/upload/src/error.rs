//! Upload flow error types.

use crate::export::DownloadError;
use crate::flow::UploadState;
use crate::media::MediaError;

/// Errors produced by the upload flow.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("not an image: {mime}")]
    InvalidMedia { mime: String },

    #[error("no media selected")]
    NoMediaSelected,

    #[error("a submission is already in flight")]
    Busy,

    #[error("action not available in state {0:?}")]
    NotAvailable(UploadState),

    #[error("cancelled")]
    Cancelled,

    #[error("outcome belongs to a superseded selection")]
    Superseded,

    #[error("media error: {0}")]
    Media(#[from] MediaError),

    #[error("service error: {0}")]
    Service(#[from] moodlens_service_client::Error),

    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("preview task failed: {0}")]
    Preview(String),
}
