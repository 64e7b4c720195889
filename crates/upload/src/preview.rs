//! Preview rendering for selected media.
//!
//! Previews are `data:` URLs built off the async executor. Completions are
//! matched against the selection generation by [`crate::UploadFlow`], so a
//! slow preview for an older selection is dropped.

use moodlens_protocol::encode_data_url;

use crate::error::UploadError;
use crate::media::SelectedMedia;

/// Encodes `media` as a displayable `data:` URL.
pub fn render_preview(media: &SelectedMedia) -> String {
    encode_data_url(media.mime(), media.bytes())
}

/// Encodes `media` on the blocking pool.
pub async fn render_preview_async(media: SelectedMedia) -> Result<String, UploadError> {
    tokio::task::spawn_blocking(move || render_preview(&media))
        .await
        .map_err(|e| UploadError::Preview(format!("task join error: {e}")))
}
