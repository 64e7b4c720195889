//! User-facing message text.
//!
//! Service failures prefer the first field-level message, then the general
//! message, then a fixed per-action fallback.

use moodlens_service_client::Error as ServiceError;

use crate::error_slot::{FlowAction, UiErrorKind};

pub const NO_MEDIA_SELECTED: &str = "Please select a photo";
pub const INVALID_MEDIA: &str = "Please select an image file";
pub const MEDIA_UNREADABLE: &str = "Unable to read the selected file";
pub const MISSING_SELECTION: &str = "Please choose an emotion and a file";

const UPLOAD_FALLBACK: &str = "Processing failed, please try again later";
const FETCH_CATALOG_FALLBACK: &str = "Unable to fetch the emotion list";
const UPLOAD_EMOJI_FALLBACK: &str = "Upload failed";
const DELETE_EMOJI_FALLBACK: &str = "Delete failed";

/// Fixed message used when a failure carries no usable text.
pub fn fallback_message(action: FlowAction) -> &'static str {
    match action {
        FlowAction::Upload => UPLOAD_FALLBACK,
        FlowAction::FetchCatalog => FETCH_CATALOG_FALLBACK,
        FlowAction::UploadEmoji => UPLOAD_EMOJI_FALLBACK,
        FlowAction::DeleteEmoji => DELETE_EMOJI_FALLBACK,
    }
}

/// Kind and message for a failed service call.
pub fn describe_service_error(action: FlowAction, err: &ServiceError) -> (UiErrorKind, String) {
    match err {
        ServiceError::Service { failure, .. } => {
            let message = failure
                .as_ref()
                .and_then(|f| f.display_message())
                .unwrap_or_else(|| fallback_message(action));
            (UiErrorKind::Service, message.to_string())
        }
        ServiceError::Json(_) => (UiErrorKind::Service, fallback_message(action).to_string()),
        ServiceError::Network(_) | ServiceError::Config(_) => {
            (UiErrorKind::Network, fallback_message(action).to_string())
        }
    }
}
