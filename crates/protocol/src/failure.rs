//! Failure payloads returned by the emotion service.
//!
//! The service reports errors in several shapes: `{"error": "..."}` from
//! handlers, `{"detail": "..."}` from raised HTTP exceptions, and
//! `{"detail": [{"msg": ...}, ...]}` (or a bare array) from request
//! validation. [`ServiceFailure`] folds them into one tagged type so callers
//! never inspect raw JSON.

use serde::{Deserialize, Serialize};

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    /// Location path of the offending field, e.g. `["query", "emotion"]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loc: Vec<serde_json::Value>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Decoded failure payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ServiceFailure {
    /// General human-readable message.
    Message { text: String },
    /// Per-field validation errors, in the order the service listed them.
    FieldErrors { errors: Vec<FieldError> },
}

impl ServiceFailure {
    /// Decodes a failure body. Returns `None` when the body matches none of
    /// the known shapes.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let wire: WireFailure = serde_json::from_slice(body).ok()?;
        match wire {
            WireFailure::Fields(errors) => Some(ServiceFailure::FieldErrors { errors }),
            WireFailure::Object(obj) => obj.into_failure(),
        }
    }

    /// Message to show the user, if the payload carries a usable one.
    ///
    /// Field errors yield the first entry's `msg` only.
    pub fn display_message(&self) -> Option<&str> {
        let text = match self {
            ServiceFailure::Message { text } => text.as_str(),
            ServiceFailure::FieldErrors { errors } => errors.first()?.msg.as_str(),
        };
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireFailure {
    Fields(Vec<FieldError>),
    Object(WireFailureObject),
}

#[derive(Deserialize)]
struct WireFailureObject {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<WireDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireDetail {
    Text(String),
    Fields(Vec<FieldError>),
}

impl WireFailureObject {
    fn into_failure(self) -> Option<ServiceFailure> {
        let mut detail_text = None;
        match self.detail {
            Some(WireDetail::Fields(errors)) if !errors.is_empty() => {
                return Some(ServiceFailure::FieldErrors { errors });
            }
            Some(WireDetail::Text(text)) => detail_text = Some(text),
            _ => {}
        }

        [self.error, detail_text, self.message]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .map(|text| ServiceFailure::Message { text })
    }
}
