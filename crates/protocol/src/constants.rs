use std::time::Duration;

/// Base origin used when no configuration overrides it.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";

/// Timeout applied to every request to the emotion service.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Detection endpoint (multipart `file`).
pub const UPLOAD_PATH: &str = "/upload";

/// Emoji catalog listing.
pub const ADMIN_EMOTIONS_PATH: &str = "/admin/emotions";

/// Emoji upload endpoint (multipart `emotion` + `file`).
pub const ADMIN_UPLOAD_PATH: &str = "/admin/upload";

/// Emoji deletion endpoint (form-encoded `emotion` + `emoji_name`).
pub const ADMIN_DELETE_PATH: &str = "/admin/delete";

/// Multipart field carrying image bytes.
pub const FIELD_FILE: &str = "file";

/// Multipart/form field carrying the emotion label.
pub const FIELD_EMOTION: &str = "emotion";

/// Form field carrying the emoji name on deletion.
pub const FIELD_EMOJI_NAME: &str = "emoji_name";

/// MIME type assumed for catalog emoji payloads.
pub const EMOJI_MIME: &str = "image/png";
