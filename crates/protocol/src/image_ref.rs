//! Displayable image references.
//!
//! The service hands images back either inline as `data:` URLs or as
//! absolute URLs. Local previews use the same `data:` encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Errors from decoding an image reference.
#[derive(Debug, thiserror::Error)]
pub enum ImageRefError {
    #[error("empty image reference")]
    Empty,

    #[error("malformed data URL")]
    MalformedDataUrl,

    #[error("data URL is not base64-encoded")]
    NotBase64,

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported image reference scheme: {0}")]
    UnsupportedScheme(String),
}

/// A parsed image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Inline `data:` payload.
    Inline { mime: String, bytes: Vec<u8> },
    /// `http(s)://` URL to be fetched by whoever displays it.
    Remote(String),
}

impl ImageRef {
    /// Parses a reference string as returned by the service.
    pub fn parse(reference: &str) -> Result<Self, ImageRefError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ImageRefError::Empty);
        }
        if let Some(rest) = reference.strip_prefix("data:") {
            let (meta, payload) = rest
                .split_once(',')
                .ok_or(ImageRefError::MalformedDataUrl)?;
            let mut params = meta.split(';');
            let mime = params.next().unwrap_or_default();
            if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
                return Err(ImageRefError::NotBase64);
            }
            let bytes = STANDARD.decode(payload)?;
            let mime = if mime.is_empty() {
                "text/plain".to_string()
            } else {
                mime.to_string()
            };
            return Ok(ImageRef::Inline { mime, bytes });
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Ok(ImageRef::Remote(reference.to_string()));
        }
        let scheme = reference
            .split_once(':')
            .map(|(s, _)| s)
            .unwrap_or(reference);
        Err(ImageRefError::UnsupportedScheme(scheme.to_string()))
    }
}

/// Encodes bytes as a base64 `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Wraps a bare base64 payload (as listed in the emoji catalog) in a
/// `data:` URL.
pub fn data_url_from_base64(mime: &str, payload: &str) -> String {
    format!("data:{mime};base64,{payload}")
}
